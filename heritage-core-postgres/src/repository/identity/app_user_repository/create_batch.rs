use async_trait::async_trait;
use heritage_core_db::models::identity::app_user::AppUserModel;
use heritage_core_db::models::indexable::Indexable;
use heritage_core_db::repository::create_batch::CreateBatch;
use sqlx::Postgres;
use std::error::Error;

use super::repo_impl::AppUserRepositoryImpl;

impl AppUserRepositoryImpl {
    pub(super) async fn create_batch_impl(
        repo: &AppUserRepositoryImpl,
        items: Vec<AppUserModel>,
    ) -> Result<Vec<AppUserModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut saved_items = Vec::new();

        let mut tx = repo.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        for item in items {
            sqlx::query(
                r#"
                INSERT INTO app_user (id, username, email, is_staff, is_superuser, date_joined)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(item.id)
            .bind(item.username.as_str())
            .bind(item.email.as_ref().map(|s| s.as_str()))
            .bind(item.is_staff)
            .bind(item.is_superuser)
            .bind(item.date_joined)
            .execute(&mut **transaction)
            .await?;

            // Insert into the hashed username index
            let idx = item.to_index();
            sqlx::query(
                r#"
                INSERT INTO app_user_idx (id, username_hash)
                VALUES ($1, $2)
                "#,
            )
            .bind(idx.id)
            .bind(idx.username_hash)
            .execute(&mut **transaction)
            .await?;

            saved_items.push(item);
        }

        Ok(saved_items)
    }
}

#[async_trait]
impl CreateBatch<Postgres, AppUserModel> for AppUserRepositoryImpl {
    async fn create_batch(
        &self,
        items: Vec<AppUserModel>,
    ) -> Result<Vec<AppUserModel>, Box<dyn Error + Send + Sync>> {
        Self::create_batch_impl(self, items).await
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_utils::test_utils::create_test_user;
    use crate::test_helper::setup_test_context;
    use heritage_core_db::repository::create_batch::CreateBatch;
    use heritage_core_db::repository::load::Load;

    #[tokio::test]
    async fn test_create_user() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let user_repo = &ctx.identity_repos().app_user_repository;

        let user = create_test_user("lina", false);
        let saved = user_repo.create_batch(vec![user.clone()]).await?;
        assert_eq!(saved.len(), 1);

        let loaded = user_repo.load(user.id).await?;
        assert_eq!(loaded.username.as_str(), "lina");
        assert!(!loaded.is_staff);

        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_username_is_rejected(
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let user_repo = &ctx.identity_repos().app_user_repository;

        let first = create_test_user("duplicate-handle", false);
        user_repo.create_batch(vec![first]).await?;

        let second = create_test_user("duplicate-handle", true);
        let result = user_repo.create_batch(vec![second]).await;
        assert!(result.is_err());

        Ok(())
    }
}
