use chrono::{DateTime, Utc};
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::CommentRepositoryImpl;

impl CommentRepositoryImpl {
    /// Hide a comment without removing the row
    ///
    /// Replies and likes referencing the comment stay intact. Returns whether
    /// a visible comment was hidden by this call.
    pub async fn soft_delete(
        &self,
        id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<bool, Box<dyn Error + Send + Sync>> {
        let mut tx = self.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        let result = sqlx::query(
            r#"
            UPDATE comment SET is_deleted = TRUE, updated_at = $2
            WHERE id = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(id)
        .bind(now)
        .execute(&mut **transaction)
        .await?;

        Ok(result.rows_affected() == 1)
    }
}
