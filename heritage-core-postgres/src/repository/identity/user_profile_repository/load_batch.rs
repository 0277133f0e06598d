use heritage_core_db::models::identity::user_profile::UserProfileModel;
use sqlx::postgres::PgRow;
use std::collections::HashMap;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::UserProfileRepositoryImpl;
use crate::utils::TryFromRow;

impl UserProfileRepositoryImpl {
    pub(super) async fn load_batch_impl(
        repo: &UserProfileRepositoryImpl,
        user_ids: &[Uuid],
    ) -> Result<Vec<Option<UserProfileModel>>, Box<dyn Error + Send + Sync>> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }

        let query = r#"SELECT * FROM user_profile WHERE user_id = ANY($1)"#;
        let rows: Vec<PgRow> = {
            let mut tx = repo.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query(query)
                .bind(user_ids)
                .fetch_all(&mut **transaction)
                .await?
        };

        let mut item_map = HashMap::new();
        for row in rows {
            let item = UserProfileModel::try_from_row(&row)?;
            item_map.insert(item.user_id, item);
        }

        let mut result = Vec::with_capacity(user_ids.len());
        for id in user_ids {
            result.push(item_map.remove(id));
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_utils::test_utils::create_test_profile;
    use crate::repository::identity::app_user_repository::test_utils::test_utils::create_test_user;
    use crate::test_helper::setup_test_context;
    use heritage_core_db::repository::create_batch::CreateBatch;
    use heritage_core_db::repository::load_batch::LoadBatch;

    #[tokio::test]
    async fn test_load_batch_by_user_id() -> Result<(), Box<dyn std::error::Error + Send + Sync>>
    {
        let ctx = setup_test_context().await?;
        let user_repo = &ctx.identity_repos().app_user_repository;
        let profile_repo = &ctx.identity_repos().user_profile_repository;

        let alpha = create_test_user("alpha-user", false);
        let beta = create_test_user("beta-user", false);
        user_repo
            .create_batch(vec![alpha.clone(), beta.clone()])
            .await?;
        profile_repo
            .create_batch(vec![
                create_test_profile(alpha.id, 1),
                create_test_profile(beta.id, 999),
            ])
            .await?;

        let loaded = profile_repo.load_batch(&[beta.id, alpha.id]).await?;
        assert_eq!(loaded[0].as_ref().unwrap().rank, 999);
        assert_eq!(loaded[1].as_ref().unwrap().rank, 1);

        Ok(())
    }
}
