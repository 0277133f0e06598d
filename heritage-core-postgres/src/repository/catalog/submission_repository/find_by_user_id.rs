use heritage_core_db::models::catalog::submission::SubmissionModel;
use heritage_core_db::repository::pagination::{Page, PageRequest};
use sqlx::postgres::PgRow;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::SubmissionRepositoryImpl;
use crate::utils::TryFromRow;

impl SubmissionRepositoryImpl {
    /// A user's submissions, newest first
    pub async fn find_by_user_id(
        &self,
        user_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<SubmissionModel>, Box<dyn Error + Send + Sync>> {
        let mut tx = self.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        let total: i64 =
            sqlx::query_scalar(r#"SELECT COUNT(*) FROM submission WHERE user_id = $1"#)
                .bind(user_id)
                .fetch_one(&mut **transaction)
                .await?;

        let rows: Vec<PgRow> = sqlx::query(
            r#"
            SELECT * FROM submission
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(user_id)
        .bind(page.limit as i64)
        .bind(page.offset as i64)
        .fetch_all(&mut **transaction)
        .await?;

        let items = rows
            .iter()
            .map(SubmissionModel::try_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(items, total as usize, page.limit, page.offset))
    }
}
