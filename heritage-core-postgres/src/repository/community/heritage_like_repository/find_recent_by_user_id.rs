use heritage_core_db::models::community::likes::HeritageLikeModel;
use sqlx::postgres::PgRow;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::HeritageLikeRepositoryImpl;
use crate::utils::TryFromRow;

impl HeritageLikeRepositoryImpl {
    /// A user's most recent likes
    pub async fn find_recent_by_user_id(
        &self,
        user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<HeritageLikeModel>, Box<dyn Error + Send + Sync>> {
        let rows: Vec<PgRow> = {
            let mut tx = self.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query(
                r#"
                SELECT * FROM heritage_like
                WHERE user_id = $1
                ORDER BY created_at DESC, id DESC
                LIMIT $2
                "#,
            )
            .bind(user_id)
            .bind(limit)
            .fetch_all(&mut **transaction)
            .await?
        };

        rows.iter().map(HeritageLikeModel::try_from_row).collect()
    }
}
