use chrono::{DateTime, Utc};
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::SubmissionRepositoryImpl;

impl SubmissionRepositoryImpl {
    /// Record the catalog object produced by converting a submission
    ///
    /// Guarded in SQL so conversion can never be recorded twice; returns
    /// whether this call won the right to convert.
    pub async fn mark_converted(
        &self,
        id: Uuid,
        object_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<bool, Box<dyn Error + Send + Sync>> {
        let mut tx = self.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        let result = sqlx::query(
            r#"
            UPDATE submission SET converted_object_id = $2, updated_at = $3
            WHERE id = $1 AND converted_object_id IS NULL
            "#,
        )
        .bind(id)
        .bind(object_id)
        .bind(now)
        .execute(&mut **transaction)
        .await?;

        Ok(result.rows_affected() == 1)
    }
}
