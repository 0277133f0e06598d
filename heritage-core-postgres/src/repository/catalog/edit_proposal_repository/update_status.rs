use chrono::{DateTime, Utc};
use heritage_core_api::domain::catalog::ReviewStatus;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::EditProposalRepositoryImpl;

impl EditProposalRepositoryImpl {
    /// Transition a pending proposal to a terminal status
    ///
    /// Only rows still Pending are touched; returns whether a row
    /// transitioned.
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
            UPDATE edit_proposal SET status = $2, updated_at = $3
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

#[cfg(test)]
mod tests {
    use super::super::test_utils::test_utils::create_test_proposal;
    use crate::repository::catalog::heritage_object_repository::test_utils::test_utils::create_test_object;
    use crate::repository::identity::app_user_repository::test_utils::test_utils::create_test_user;
    use crate::test_helper::setup_test_context;
    use chrono::Utc;
    use heritage_core_api::domain::catalog::ReviewStatus;
    use heritage_core_db::repository::create_batch::CreateBatch;
    use serde_json::json;

    #[tokio::test]
    async fn test_rejection_is_terminal() -> Result<(), Box<dyn std::error::Error + Send + Sync>>
    {
        let ctx = setup_test_context().await?;
        let user_repo = &ctx.identity_repos().app_user_repository;
        let object_repo = &ctx.catalog_repos().heritage_object_repository;
        let proposal_repo = &ctx.catalog_repos().edit_proposal_repository;

        let user = create_test_user("terminal-proposer", false);
        user_repo.create_batch(vec![user.clone()]).await?;
        let object = create_test_object("Terminal target");
        object_repo.create_batch(vec![object.clone()]).await?;

        let proposal = create_test_proposal(user.id, object.id, json!({"maker": "Anonymous"}));
        proposal_repo.create_batch(vec![proposal.clone()]).await?;

        assert!(
            proposal_repo
                .update_status(proposal.id, ReviewStatus::Rejected, Utc::now())
                .await?
        );
        assert!(
            !proposal_repo
                .update_status(proposal.id, ReviewStatus::Approved, Utc::now())
                .await?
        );

        Ok(())
    }
}
