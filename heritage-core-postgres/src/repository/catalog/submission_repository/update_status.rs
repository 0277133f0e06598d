use chrono::{DateTime, Utc};
use heritage_core_api::domain::catalog::ReviewStatus;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::SubmissionRepositoryImpl;

impl SubmissionRepositoryImpl {
    /// Transition a pending submission to a terminal status
    ///
    /// The one-way state machine is enforced in SQL: only rows still Pending
    /// are touched. Returns whether a row transitioned.
    pub async fn update_status(
        &self,
        id: Uuid,
        status: ReviewStatus,
        now: DateTime<Utc>,
    ) -> Result<bool, Box<dyn Error + Send + Sync>> {
        let mut tx = self.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        let result = sqlx::query(
            r#"
            UPDATE submission SET status = $2, updated_at = $3
            WHERE id = $1 AND status = 'Pending'
            "#,
        )
        .bind(id)
        .bind(status)
        .bind(now)
        .execute(&mut **transaction)
        .await?;

        Ok(result.rows_affected() == 1)
    }
}
