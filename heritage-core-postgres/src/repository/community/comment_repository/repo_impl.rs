use async_trait::async_trait;
use heritage_core_db::models::community::comment::CommentModel;
use heritage_core_db::repository::load::Load;
use heritage_core_db::repository::load_batch::LoadBatch;
use sqlx::postgres::PgRow;
use sqlx::{Postgres, Row};
use std::error::Error;
use uuid::Uuid;

use crate::executor::Executor;
use crate::utils::TryFromRow;

pub struct CommentRepositoryImpl {
    pub(crate) executor: Executor,
}

impl CommentRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}

#[async_trait]
impl Load<Postgres, CommentModel> for CommentRepositoryImpl {
    async fn load(&self, id: Uuid) -> Result<CommentModel, Box<dyn Error + Send + Sync>> {
        let results = self.load_batch(&[id]).await?;
        results
            .into_iter()
            .next()
            .flatten()
            .ok_or_else(|| "Entity not found".into())
    }
}

#[async_trait]
impl LoadBatch<Postgres, CommentModel> for CommentRepositoryImpl {
    async fn load_batch(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<Option<CommentModel>>, Box<dyn Error + Send + Sync>> {
        Self::load_batch_impl(self, ids).await
    }
}

impl TryFromRow<PgRow> for CommentModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(CommentModel {
            id: row.get("id"),
            user_id: row.get("user_id"),
            object_id: row.get("object_id"),
            body: row.get("body"),
            parent_id: row.try_get("parent_id").ok().flatten(),
            is_deleted: row.get("is_deleted"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        })
    }
}
