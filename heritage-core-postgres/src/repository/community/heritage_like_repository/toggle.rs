use chrono::{DateTime, Utc};
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::HeritageLikeRepositoryImpl;

impl HeritageLikeRepositoryImpl {
    /// Toggle the (user, object) like pair
    ///
    /// The insert races through the unique constraint: zero rows affected
    /// means the pair already exists (ours or a concurrent request's), and
    /// the toggle resolves to a delete. Returns whether the like exists after
    /// the call.
    pub async fn toggle(
        &self,
        user_id: Uuid,
        object_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<bool, Box<dyn Error + Send + Sync>> {
        let mut tx = self.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        let inserted = sqlx::query(
            r#"
            INSERT INTO heritage_like (id, user_id, object_id, created_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id, object_id) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(object_id)
        .bind(now)
        .execute(&mut **transaction)
        .await?;

        if inserted.rows_affected() == 1 {
            return Ok(true);
        }

        sqlx::query(r#"DELETE FROM heritage_like WHERE user_id = $1 AND object_id = $2"#)
            .bind(user_id)
            .bind(object_id)
            .execute(&mut **transaction)
            .await?;

        Ok(false)
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
    async fn test_toggles_alternate() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let user_repo = &ctx.identity_repos().app_user_repository;
        let object_repo = &ctx.catalog_repos().heritage_object_repository;
        let like_repo = &ctx.community_repos().heritage_like_repository;

        let user = create_test_user("like-toggler", false);
        user_repo.create_batch(vec![user.clone()]).await?;
        let object = create_test_object("Likeable object");
        object_repo.create_batch(vec![object.clone()]).await?;

        // 2N toggles end in the original state
        for _ in 0..3 {
            assert!(like_repo.toggle(user.id, object.id, Utc::now()).await?);
            assert!(!like_repo.toggle(user.id, object.id, Utc::now()).await?);
        }

        let count = like_repo.count_by_object_id(object.id).await?;
        assert_eq!(count, 0);

        Ok(())
    }
}
