use async_trait::async_trait;
use heritage_core_db::models::catalog::edit_proposal::EditProposalModel;
use heritage_core_db::repository::create_batch::CreateBatch;
use sqlx::Postgres;
use std::error::Error;

use super::repo_impl::EditProposalRepositoryImpl;

impl EditProposalRepositoryImpl {
    pub(super) async fn create_batch_impl(
        repo: &EditProposalRepositoryImpl,
        items: Vec<EditProposalModel>,
    ) -> Result<Vec<EditProposalModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut saved_items = Vec::new();

        let mut tx = repo.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        for item in items {
            sqlx::query(
                r#"
                INSERT INTO edit_proposal (
                    id, user_id, object_id, note, data, status, created_at, updated_at
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                "#,
            )
            .bind(item.id)
            .bind(item.user_id)
            .bind(item.object_id)
            .bind(item.note.as_deref())
            .bind(&item.data)
            .bind(item.status)
            .bind(item.created_at)
            .bind(item.updated_at)
            .execute(&mut **transaction)
            .await?;

            saved_items.push(item);
        }

        Ok(saved_items)
    }
}

#[async_trait]
impl CreateBatch<Postgres, EditProposalModel> for EditProposalRepositoryImpl {
    async fn create_batch(
        &self,
        items: Vec<EditProposalModel>,
    ) -> Result<Vec<EditProposalModel>, Box<dyn Error + Send + Sync>> {
        Self::create_batch_impl(self, items).await
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_utils::test_utils::create_test_proposal;
    use crate::repository::catalog::heritage_object_repository::test_utils::test_utils::create_test_object;
    use crate::repository::identity::app_user_repository::test_utils::test_utils::create_test_user;
    use crate::test_helper::setup_test_context;
    use heritage_core_api::domain::catalog::ReviewStatus;
    use heritage_core_db::repository::create_batch::CreateBatch;
    use heritage_core_db::repository::load::Load;
    use serde_json::json;

    #[tokio::test]
    async fn test_create_proposal_round_trips_jsonb(
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let user_repo = &ctx.identity_repos().app_user_repository;
        let object_repo = &ctx.catalog_repos().heritage_object_repository;
        let proposal_repo = &ctx.catalog_repos().edit_proposal_repository;

        let user = create_test_user("proposer", false);
        user_repo.create_batch(vec![user.clone()]).await?;
        let object = create_test_object("Proposal target");
        object_repo.create_batch(vec![object.clone()]).await?;

        let proposal = create_test_proposal(
            user.id,
            object.id,
            json!({"maker": "Najdi craftsman", "period": "Late Ottoman"}),
        );
        proposal_repo.create_batch(vec![proposal.clone()]).await?;

        let loaded = proposal_repo.load(proposal.id).await?;
        assert_eq!(loaded.status, ReviewStatus::Pending);
        assert_eq!(loaded.data["maker"], "Najdi craftsman");
        assert_eq!(loaded.patch().unwrap().len(), 2);

        Ok(())
    }
}
