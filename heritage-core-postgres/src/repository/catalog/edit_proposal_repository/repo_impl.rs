use async_trait::async_trait;
use heritage_core_db::models::catalog::edit_proposal::EditProposalModel;
use heritage_core_db::repository::load::Load;
use heritage_core_db::repository::load_batch::LoadBatch;
use sqlx::postgres::PgRow;
use sqlx::{Postgres, Row};
use std::error::Error;
use uuid::Uuid;

use crate::executor::Executor;
use crate::utils::TryFromRow;

pub struct EditProposalRepositoryImpl {
    pub(crate) executor: Executor,
}

impl EditProposalRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}

#[async_trait]
impl Load<Postgres, EditProposalModel> for EditProposalRepositoryImpl {
    async fn load(&self, id: Uuid) -> Result<EditProposalModel, Box<dyn Error + Send + Sync>> {
        let results = self.load_batch(&[id]).await?;
        results
            .into_iter()
            .next()
            .flatten()
            .ok_or_else(|| "Entity not found".into())
    }
}

#[async_trait]
impl LoadBatch<Postgres, EditProposalModel> for EditProposalRepositoryImpl {
    async fn load_batch(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<Option<EditProposalModel>>, Box<dyn Error + Send + Sync>> {
        Self::load_batch_impl(self, ids).await
    }
}

impl TryFromRow<PgRow> for EditProposalModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(EditProposalModel {
            id: row.get("id"),
            user_id: row.get("user_id"),
            object_id: row.get("object_id"),
            note: row.get("note"),
            data: row.get("data"),
            status: row.get("status"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        })
    }
}
