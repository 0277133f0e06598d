use async_trait::async_trait;
use heritage_core_db::models::catalog::submission::SubmissionModel;
use heritage_core_db::repository::create_batch::CreateBatch;
use sqlx::Postgres;
use std::error::Error;

use super::repo_impl::SubmissionRepositoryImpl;

impl SubmissionRepositoryImpl {
    pub(super) async fn create_batch_impl(
        repo: &SubmissionRepositoryImpl,
        items: Vec<SubmissionModel>,
    ) -> Result<Vec<SubmissionModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut saved_items = Vec::new();

        let mut tx = repo.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        for item in items {
            sqlx::query(
                r#"
                INSERT INTO submission (
                    id, user_id, title, title_ar, title_fr,
                    description, description_ar, description_fr,
                    region, object_type, ich_domain, origin_date,
                    image, model_3d,
                    alternate_name, maker, attribution, period, origin_place,
                    materials, dimensions, weight,
                    status, converted_object_id, created_at, updated_at
                )
                VALUES (
                    $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13,
                    $14, $15, $16, $17, $18, $19, $20, $21, $22, $23, $24,
                    $25, $26
                )
                "#,
            )
            .bind(item.id)
            .bind(item.user_id)
            .bind(item.title.as_str())
            .bind(item.title_ar.as_ref().map(|s| s.as_str()))
            .bind(item.title_fr.as_ref().map(|s| s.as_str()))
            .bind(item.description.as_str())
            .bind(item.description_ar.as_deref())
            .bind(item.description_fr.as_deref())
            .bind(item.region)
            .bind(item.object_type)
            .bind(item.ich_domain)
            .bind(item.origin_date)
            .bind(item.image.as_ref().map(|s| s.as_str()))
            .bind(item.model_3d.as_ref().map(|s| s.as_str()))
            .bind(item.alternate_name.as_ref().map(|s| s.as_str()))
            .bind(item.maker.as_ref().map(|s| s.as_str()))
            .bind(item.attribution.as_ref().map(|s| s.as_str()))
            .bind(item.period.as_ref().map(|s| s.as_str()))
            .bind(item.origin_place.as_ref().map(|s| s.as_str()))
            .bind(item.materials.as_deref())
            .bind(item.dimensions.as_ref().map(|s| s.as_str()))
            .bind(item.weight.as_ref().map(|s| s.as_str()))
            .bind(item.status)
            .bind(item.converted_object_id)
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
impl CreateBatch<Postgres, SubmissionModel> for SubmissionRepositoryImpl {
    async fn create_batch(
        &self,
        items: Vec<SubmissionModel>,
    ) -> Result<Vec<SubmissionModel>, Box<dyn Error + Send + Sync>> {
        Self::create_batch_impl(self, items).await
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_utils::test_utils::create_test_submission;
    use crate::repository::identity::app_user_repository::test_utils::test_utils::create_test_user;
    use crate::test_helper::setup_test_context;
    use heritage_core_api::domain::catalog::ReviewStatus;
    use heritage_core_db::repository::create_batch::CreateBatch;
    use heritage_core_db::repository::load::Load;

    #[tokio::test]
    async fn test_create_submission() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let user_repo = &ctx.identity_repos().app_user_repository;
        let submission_repo = &ctx.catalog_repos().submission_repository;

        let user = create_test_user("submitter", false);
        user_repo.create_batch(vec![user.clone()]).await?;

        let submission = create_test_submission(user.id, "Candidate object");
        submission_repo.create_batch(vec![submission.clone()]).await?;

        let loaded = submission_repo.load(submission.id).await?;
        assert_eq!(loaded.title.as_str(), "Candidate object");
        assert_eq!(loaded.status, ReviewStatus::Pending);
        assert!(loaded.converted_object_id.is_none());

        Ok(())
    }
}
