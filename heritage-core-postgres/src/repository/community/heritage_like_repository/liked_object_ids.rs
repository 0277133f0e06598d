use sqlx::Row;
use std::collections::HashSet;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::HeritageLikeRepositoryImpl;

impl HeritageLikeRepositoryImpl {
    /// Which of the given objects the user has liked
    pub async fn liked_object_ids(
        &self,
        user_id: Uuid,
        object_ids: &[Uuid],
    ) -> Result<HashSet<Uuid>, Box<dyn Error + Send + Sync>> {
        if object_ids.is_empty() {
            return Ok(HashSet::new());
        }

        let mut tx = self.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        let rows = sqlx::query(
            r#"SELECT object_id FROM heritage_like WHERE user_id = $1 AND object_id = ANY($2)"#,
        )
        .bind(user_id)
        .bind(object_ids)
        .fetch_all(&mut **transaction)
        .await?;

        rows.iter()
            .map(|row| row.try_get("object_id").map_err(Into::into))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::repository::catalog::heritage_object_repository::test_utils::test_utils::create_test_object;
    use crate::repository::identity::app_user_repository::test_utils::test_utils::create_test_user;
    use crate::test_helper::setup_test_context;
    use chrono::Utc;
    use heritage_core_db::repository::create_batch::CreateBatch;

    #[tokio::test]
    async fn test_liked_object_ids() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let user_repo = &ctx.identity_repos().app_user_repository;
        let object_repo = &ctx.catalog_repos().heritage_object_repository;
        let like_repo = &ctx.community_repos().heritage_like_repository;

        let user = create_test_user("selective-liker", false);
        user_repo.create_batch(vec![user.clone()]).await?;
        let liked = create_test_object("Liked object");
        let ignored = create_test_object("Ignored object");
        object_repo
            .create_batch(vec![liked.clone(), ignored.clone()])
            .await?;

        like_repo.toggle(user.id, liked.id, Utc::now()).await?;

        let ids = like_repo
            .liked_object_ids(user.id, &[liked.id, ignored.id])
            .await?;
        assert!(ids.contains(&liked.id));
        assert!(!ids.contains(&ignored.id));

        Ok(())
    }
}
