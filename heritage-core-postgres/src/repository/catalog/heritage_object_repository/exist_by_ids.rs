use async_trait::async_trait;
use heritage_core_db::repository::exist_by_ids::ExistByIds;
use sqlx::{Postgres, Row};
use std::collections::HashSet;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::HeritageObjectRepositoryImpl;

impl HeritageObjectRepositoryImpl {
    pub(super) async fn exist_by_ids_impl(
        repo: &HeritageObjectRepositoryImpl,
        ids: &[Uuid],
    ) -> Result<Vec<(Uuid, bool)>, Box<dyn Error + Send + Sync>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = {
            let mut tx = repo.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query(r#"SELECT id FROM heritage_object WHERE id = ANY($1)"#)
                .bind(ids)
                .fetch_all(&mut **transaction)
                .await?
        };

        let found: HashSet<Uuid> = rows
            .iter()
            .map(|row| row.try_get("id"))
            .collect::<Result<_, _>>()?;

        Ok(ids.iter().map(|id| (*id, found.contains(id))).collect())
    }
}

#[async_trait]
impl ExistByIds<Postgres> for HeritageObjectRepositoryImpl {
    async fn exist_by_ids(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<(Uuid, bool)>, Box<dyn Error + Send + Sync>> {
        Self::exist_by_ids_impl(self, ids).await
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_utils::test_utils::create_test_object;
    use crate::test_helper::setup_test_context;
    use heritage_core_db::repository::create_batch::CreateBatch;
    use heritage_core_db::repository::exist_by_ids::ExistByIds;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_exist_by_ids() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let object_repo = &ctx.catalog_repos().heritage_object_repository;

        let object = create_test_object("Existence probe");
        object_repo.create_batch(vec![object.clone()]).await?;

        let missing = Uuid::new_v4();
        let result = object_repo.exist_by_ids(&[object.id, missing]).await?;
        assert_eq!(result, vec![(object.id, true), (missing, false)]);

        Ok(())
    }
}
