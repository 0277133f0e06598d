use async_trait::async_trait;
use heritage_core_db::models::catalog::heritage_object::HeritageObjectModel;
use heritage_core_db::repository::update_batch::UpdateBatch;
use sqlx::Postgres;
use std::error::Error;

use super::repo_impl::HeritageObjectRepositoryImpl;

impl HeritageObjectRepositoryImpl {
    pub(super) async fn update_batch_impl(
        repo: &HeritageObjectRepositoryImpl,
        items: Vec<HeritageObjectModel>,
    ) -> Result<Vec<HeritageObjectModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut saved_items = Vec::new();

        let mut tx = repo.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        for item in items {
            let result = sqlx::query(
                r#"
                UPDATE heritage_object SET
                    title = $2, title_ar = $3, title_fr = $4,
                    description = $5, description_ar = $6, description_fr = $7,
                    region = $8, object_type = $9, ich_domain = $10, origin_date = $11,
                    image = $12, thumbnail = $13, model_3d = $14,
                    alternate_name = $15, maker = $16, attribution = $17,
                    copy_after = $18, sitter = $19,
                    date_text = $20, period = $21, origin_place = $22,
                    provenance = $23, collector = $24, site_name = $25,
                    field_identifier = $26,
                    materials = $27, dimensions = $28, weight = $29, taxon = $30,
                    collection_name = $31, on_view_location = $32,
                    exhibition_history = $33,
                    credit_line = $34, data_source = $35, rights = $36,
                    accession_number = $37, object_number = $38, record_id = $39,
                    metadata_usage = $40, guid = $41, related_resource = $42
                WHERE id = $1
                "#,
            )
            .bind(item.id)
            .bind(item.title.as_str())
            .bind(item.title_ar.as_ref().map(|s| s.as_str()))
            .bind(item.title_fr.as_ref().map(|s| s.as_str()))
            .bind(item.description.as_str())
            .bind(item.description_ar.as_deref())
            .bind(item.description_fr.as_deref())
            .bind(item.region)
            .bind(item.object_type)
            .bind(item.ich_domain)
            .bind(item.origin_date)
            .bind(item.image.as_ref().map(|s| s.as_str()))
            .bind(item.thumbnail.as_ref().map(|s| s.as_str()))
            .bind(item.model_3d.as_ref().map(|s| s.as_str()))
            .bind(item.alternate_name.as_ref().map(|s| s.as_str()))
            .bind(item.maker.as_ref().map(|s| s.as_str()))
            .bind(item.attribution.as_ref().map(|s| s.as_str()))
            .bind(item.copy_after.as_ref().map(|s| s.as_str()))
            .bind(item.sitter.as_ref().map(|s| s.as_str()))
            .bind(item.date_text.as_ref().map(|s| s.as_str()))
            .bind(item.period.as_ref().map(|s| s.as_str()))
            .bind(item.origin_place.as_ref().map(|s| s.as_str()))
            .bind(item.provenance.as_deref())
            .bind(item.collector.as_ref().map(|s| s.as_str()))
            .bind(item.site_name.as_ref().map(|s| s.as_str()))
            .bind(item.field_identifier.as_ref().map(|s| s.as_str()))
            .bind(item.materials.as_deref())
            .bind(item.dimensions.as_ref().map(|s| s.as_str()))
            .bind(item.weight.as_ref().map(|s| s.as_str()))
            .bind(item.taxon.as_ref().map(|s| s.as_str()))
            .bind(item.collection_name.as_ref().map(|s| s.as_str()))
            .bind(item.on_view_location.as_ref().map(|s| s.as_str()))
            .bind(item.exhibition_history.as_deref())
            .bind(item.credit_line.as_ref().map(|s| s.as_str()))
            .bind(item.data_source.as_ref().map(|s| s.as_str()))
            .bind(item.rights.as_ref().map(|s| s.as_str()))
            .bind(item.accession_number.as_ref().map(|s| s.as_str()))
            .bind(item.object_number.as_ref().map(|s| s.as_str()))
            .bind(item.record_id.as_ref().map(|s| s.as_str()))
            .bind(item.metadata_usage.as_ref().map(|s| s.as_str()))
            .bind(item.guid.as_ref().map(|s| s.as_str()))
            .bind(item.related_resource.as_ref().map(|s| s.as_str()))
            .execute(&mut **transaction)
            .await?;

            if result.rows_affected() == 0 {
                return Err(format!("heritage object {} does not exist", item.id).into());
            }

            saved_items.push(item);
        }

        Ok(saved_items)
    }
}

#[async_trait]
impl UpdateBatch<Postgres, HeritageObjectModel> for HeritageObjectRepositoryImpl {
    async fn update_batch(
        &self,
        items: Vec<HeritageObjectModel>,
    ) -> Result<Vec<HeritageObjectModel>, Box<dyn Error + Send + Sync>> {
        Self::update_batch_impl(self, items).await
    }
}
