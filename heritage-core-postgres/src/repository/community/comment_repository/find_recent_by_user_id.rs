use heritage_core_db::models::community::comment::CommentModel;
use sqlx::postgres::PgRow;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::CommentRepositoryImpl;
use crate::utils::TryFromRow;

impl CommentRepositoryImpl {
    /// A user's most recent visible comments
    pub async fn find_recent_by_user_id(
        &self,
        user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<CommentModel>, Box<dyn Error + Send + Sync>> {
        let rows: Vec<PgRow> = {
            let mut tx = self.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query(
                r#"
                SELECT * FROM comment
                WHERE user_id = $1 AND is_deleted = FALSE
                ORDER BY created_at DESC, id DESC
                LIMIT $2
                "#,
            )
            .bind(user_id)
            .bind(limit)
            .fetch_all(&mut **transaction)
            .await?
        };

        rows.iter().map(CommentModel::try_from_row).collect()
    }
}
