use heritage_core_db::models::identity::app_user::AppUserIdxModel;
use sqlx::postgres::PgRow;
use std::error::Error;

use super::repo_impl::AppUserRepositoryImpl;
use crate::utils::TryFromRow;

impl AppUserRepositoryImpl {
    /// Find index records whose username hashes to the given value
    ///
    /// Hash collisions are possible in principle, so callers must compare the
    /// loaded username against the one they were looking for.
    pub async fn find_by_username_hash(
        &self,
        username_hash: i64,
    ) -> Result<Vec<AppUserIdxModel>, Box<dyn Error + Send + Sync>> {
        let rows: Vec<PgRow> = {
            let mut tx = self.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query(r#"SELECT * FROM app_user_idx WHERE username_hash = $1"#)
                .bind(username_hash)
                .fetch_all(&mut **transaction)
                .await?
        };

        rows.iter().map(AppUserIdxModel::try_from_row).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_utils::test_utils::create_test_user;
    use crate::test_helper::setup_test_context;
    use heritage_core_db::repository::create_batch::CreateBatch;
    use heritage_core_db::utils::hash_as_i64;

    #[tokio::test]
    async fn test_find_by_username_hash() -> Result<(), Box<dyn std::error::Error + Send + Sync>>
    {
        let ctx = setup_test_context().await?;
        let user_repo = &ctx.identity_repos().app_user_repository;

        let user = create_test_user("hash-lookup-user", false);
        let saved = user_repo.create_batch(vec![user]).await?;

        let found = user_repo
            .find_by_username_hash(hash_as_i64(&"hash-lookup-user"))
            .await?;
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, saved[0].id);

        let found = user_repo
            .find_by_username_hash(hash_as_i64(&"nobody-here"))
            .await?;
        assert!(found.is_empty());

        Ok(())
    }
}
