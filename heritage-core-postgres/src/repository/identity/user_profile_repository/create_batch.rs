use async_trait::async_trait;
use heritage_core_db::models::identity::user_profile::UserProfileModel;
use heritage_core_db::repository::create_batch::CreateBatch;
use sqlx::Postgres;
use std::error::Error;

use super::repo_impl::UserProfileRepositoryImpl;

impl UserProfileRepositoryImpl {
    pub(super) async fn create_batch_impl(
        repo: &UserProfileRepositoryImpl,
        items: Vec<UserProfileModel>,
    ) -> Result<Vec<UserProfileModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut saved_items = Vec::new();

        let mut tx = repo.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        for item in items {
            sqlx::query(
                r#"
                INSERT INTO user_profile (user_id, bio, profile_photo_url, rank, created_at)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(item.user_id)
            .bind(item.bio.as_deref())
            .bind(item.profile_photo_url.as_ref().map(|s| s.as_str()))
            .bind(item.rank)
            .bind(item.created_at)
            .execute(&mut **transaction)
            .await?;

            saved_items.push(item);
        }

        Ok(saved_items)
    }
}

#[async_trait]
impl CreateBatch<Postgres, UserProfileModel> for UserProfileRepositoryImpl {
    async fn create_batch(
        &self,
        items: Vec<UserProfileModel>,
    ) -> Result<Vec<UserProfileModel>, Box<dyn Error + Send + Sync>> {
        Self::create_batch_impl(self, items).await
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_utils::test_utils::create_test_profile;
    use crate::repository::identity::app_user_repository::test_utils::test_utils::create_test_user;
    use crate::test_helper::setup_test_context;
    use heritage_core_db::repository::create_batch::CreateBatch;
    use heritage_core_db::repository::load::Load;

    #[tokio::test]
    async fn test_create_profile() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let user_repo = &ctx.identity_repos().app_user_repository;
        let profile_repo = &ctx.identity_repos().user_profile_repository;

        let user = create_test_user("profile-owner", false);
        user_repo.create_batch(vec![user.clone()]).await?;

        let profile = create_test_profile(user.id, 1);
        profile_repo.create_batch(vec![profile]).await?;

        let loaded = profile_repo.load(user.id).await?;
        assert_eq!(loaded.rank, 1);
        assert!(loaded.profile_photo_url.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_second_profile_for_a_user_is_rejected(
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let user_repo = &ctx.identity_repos().app_user_repository;
        let profile_repo = &ctx.identity_repos().user_profile_repository;

        let user = create_test_user("single-profile-owner", false);
        user_repo.create_batch(vec![user.clone()]).await?;

        profile_repo
            .create_batch(vec![create_test_profile(user.id, 1)])
            .await?;
        let result = profile_repo
            .create_batch(vec![create_test_profile(user.id, 997)])
            .await;
        assert!(result.is_err());

        Ok(())
    }
}
