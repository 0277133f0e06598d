use async_trait::async_trait;
use heritage_core_db::models::catalog::heritage_object::HeritageObjectModel;
use heritage_core_db::repository::load::Load;
use heritage_core_db::repository::load_batch::LoadBatch;
use sqlx::postgres::PgRow;
use sqlx::{Postgres, Row};
use std::error::Error;
use uuid::Uuid;

use crate::executor::Executor;
use crate::utils::{get_heapless_string, get_optional_heapless_string, TryFromRow};

pub struct HeritageObjectRepositoryImpl {
    pub(crate) executor: Executor,
}

impl HeritageObjectRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}

#[async_trait]
impl Load<Postgres, HeritageObjectModel> for HeritageObjectRepositoryImpl {
    async fn load(&self, id: Uuid) -> Result<HeritageObjectModel, Box<dyn Error + Send + Sync>> {
        let results = self.load_batch(&[id]).await?;
        results
            .into_iter()
            .next()
            .flatten()
            .ok_or_else(|| "Entity not found".into())
    }
}

#[async_trait]
impl LoadBatch<Postgres, HeritageObjectModel> for HeritageObjectRepositoryImpl {
    async fn load_batch(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<Option<HeritageObjectModel>>, Box<dyn Error + Send + Sync>> {
        Self::load_batch_impl(self, ids).await
    }
}

impl TryFromRow<PgRow> for HeritageObjectModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(HeritageObjectModel {
            id: row.get("id"),
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
            thumbnail: get_optional_heapless_string(row, "thumbnail")?,
            model_3d: get_optional_heapless_string(row, "model_3d")?,
            alternate_name: get_optional_heapless_string(row, "alternate_name")?,
            maker: get_optional_heapless_string(row, "maker")?,
            attribution: get_optional_heapless_string(row, "attribution")?,
            copy_after: get_optional_heapless_string(row, "copy_after")?,
            sitter: get_optional_heapless_string(row, "sitter")?,
            date_text: get_optional_heapless_string(row, "date_text")?,
            period: get_optional_heapless_string(row, "period")?,
            origin_place: get_optional_heapless_string(row, "origin_place")?,
            provenance: row.get("provenance"),
            collector: get_optional_heapless_string(row, "collector")?,
            site_name: get_optional_heapless_string(row, "site_name")?,
            field_identifier: get_optional_heapless_string(row, "field_identifier")?,
            materials: row.get("materials"),
            dimensions: get_optional_heapless_string(row, "dimensions")?,
            weight: get_optional_heapless_string(row, "weight")?,
            taxon: get_optional_heapless_string(row, "taxon")?,
            collection_name: get_optional_heapless_string(row, "collection_name")?,
            on_view_location: get_optional_heapless_string(row, "on_view_location")?,
            exhibition_history: row.get("exhibition_history"),
            credit_line: get_optional_heapless_string(row, "credit_line")?,
            data_source: get_optional_heapless_string(row, "data_source")?,
            rights: get_optional_heapless_string(row, "rights")?,
            accession_number: get_optional_heapless_string(row, "accession_number")?,
            object_number: get_optional_heapless_string(row, "object_number")?,
            record_id: get_optional_heapless_string(row, "record_id")?,
            metadata_usage: get_optional_heapless_string(row, "metadata_usage")?,
            guid: get_optional_heapless_string(row, "guid")?,
            related_resource: get_optional_heapless_string(row, "related_resource")?,
        })
    }
}
