use async_trait::async_trait;
use heritage_core_db::models::catalog::submission::SubmissionModel;
use heritage_core_db::repository::load::Load;
use heritage_core_db::repository::load_batch::LoadBatch;
use sqlx::postgres::PgRow;
use sqlx::{Postgres, Row};
use std::error::Error;
use uuid::Uuid;

use crate::executor::Executor;
use crate::utils::{get_heapless_string, get_optional_heapless_string, TryFromRow};

pub struct SubmissionRepositoryImpl {
    pub(crate) executor: Executor,
}

impl SubmissionRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}

#[async_trait]
impl Load<Postgres, SubmissionModel> for SubmissionRepositoryImpl {
    async fn load(&self, id: Uuid) -> Result<SubmissionModel, Box<dyn Error + Send + Sync>> {
        let results = self.load_batch(&[id]).await?;
        results
            .into_iter()
            .next()
            .flatten()
            .ok_or_else(|| "Entity not found".into())
    }
}

#[async_trait]
impl LoadBatch<Postgres, SubmissionModel> for SubmissionRepositoryImpl {
    async fn load_batch(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<Option<SubmissionModel>>, Box<dyn Error + Send + Sync>> {
        Self::load_batch_impl(self, ids).await
    }
}

impl TryFromRow<PgRow> for SubmissionModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(SubmissionModel {
            id: row.get("id"),
            user_id: row.get("user_id"),
            title: get_heapless_string(row, "title")?,
            title_ar: get_optional_heapless_string(row, "title_ar")?,
            title_fr: get_optional_heapless_string(row, "title_fr")?,
            description: row.get("description"),
            description_ar: row.get("description_ar"),
            description_fr: row.get("description_fr"),
            region: row.get("region"),
            object_type: row.get("object_type"),
            ich_domain: row.get("ich_domain"),
            origin_date: row.get("origin_date"),
            image: get_optional_heapless_string(row, "image")?,
            model_3d: get_optional_heapless_string(row, "model_3d")?,
            alternate_name: get_optional_heapless_string(row, "alternate_name")?,
            maker: get_optional_heapless_string(row, "maker")?,
            attribution: get_optional_heapless_string(row, "attribution")?,
            period: get_optional_heapless_string(row, "period")?,
            origin_place: get_optional_heapless_string(row, "origin_place")?,
            materials: row.get("materials"),
            dimensions: get_optional_heapless_string(row, "dimensions")?,
            weight: get_optional_heapless_string(row, "weight")?,
            status: row.get("status"),
            converted_object_id: row.try_get("converted_object_id").ok().flatten(),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        })
    }
}
