use std::error::Error;
use uuid::Uuid;

use super::repo_impl::UserProfileRepositoryImpl;

impl UserProfileRepositoryImpl {
    /// Overwrite the stored profile photo URL
    ///
    /// Pass None to clear the photo. Returns whether a profile row was
    /// actually updated.
    pub async fn update_photo_url(
        &self,
        user_id: Uuid,
        photo_url: Option<&str>,
    ) -> Result<bool, Box<dyn Error + Send + Sync>> {
        let mut tx = self.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        let result = sqlx::query(
            r#"
            UPDATE user_profile SET profile_photo_url = $2 WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .bind(photo_url)
        .execute(&mut **transaction)
        .await?;

        Ok(result.rows_affected() == 1)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_utils::test_utils::create_test_profile;
    use crate::repository::identity::app_user_repository::test_utils::test_utils::create_test_user;
    use crate::test_helper::setup_test_context;
    use heritage_core_db::repository::create_batch::CreateBatch;
    use heritage_core_db::repository::load::Load;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_update_photo_url() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let user_repo = &ctx.identity_repos().app_user_repository;
        let profile_repo = &ctx.identity_repos().user_profile_repository;

        let user = create_test_user("photo-owner", false);
        user_repo.create_batch(vec![user.clone()]).await?;
        profile_repo
            .create_batch(vec![create_test_profile(user.id, 1)])
            .await?;

        let updated = profile_repo
            .update_photo_url(user.id, Some("https://lh3.example.com/photo.jpg"))
            .await?;
        assert!(updated);

        let loaded = profile_repo.load(user.id).await?;
        assert_eq!(
            loaded.profile_photo_url.as_ref().unwrap().as_str(),
            "https://lh3.example.com/photo.jpg"
        );

        let updated = profile_repo
            .update_photo_url(Uuid::new_v4(), Some("https://nowhere.example.com/x.jpg"))
            .await?;
        assert!(!updated);

        Ok(())
    }
}
