use async_trait::async_trait;
use heritage_core_db::models::catalog::heritage_object::HeritageObjectModel;
use heritage_core_db::repository::create_batch::CreateBatch;
use sqlx::Postgres;
use std::error::Error;

use super::repo_impl::HeritageObjectRepositoryImpl;

impl HeritageObjectRepositoryImpl {
    pub(super) async fn create_batch_impl(
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
            sqlx::query(
                r#"
                INSERT INTO heritage_object (
                    id, title, title_ar, title_fr,
                    description, description_ar, description_fr,
                    region, object_type, ich_domain, origin_date,
                    image, thumbnail, model_3d,
                    alternate_name, maker, attribution, copy_after, sitter,
                    date_text, period, origin_place,
                    provenance, collector, site_name, field_identifier,
                    materials, dimensions, weight, taxon,
                    collection_name, on_view_location, exhibition_history,
                    credit_line, data_source, rights,
                    accession_number, object_number, record_id, metadata_usage,
                    guid, related_resource
                )
                VALUES (
                    $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14,
                    $15, $16, $17, $18, $19, $20, $21, $22, $23, $24, $25, $26,
                    $27, $28, $29, $30, $31, $32, $33, $34, $35, $36, $37, $38,
                    $39, $40, $41, $42
                )
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

            saved_items.push(item);
        }

        Ok(saved_items)
    }
}

#[async_trait]
impl CreateBatch<Postgres, HeritageObjectModel> for HeritageObjectRepositoryImpl {
    async fn create_batch(
        &self,
        items: Vec<HeritageObjectModel>,
    ) -> Result<Vec<HeritageObjectModel>, Box<dyn Error + Send + Sync>> {
        Self::create_batch_impl(self, items).await
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_utils::test_utils::create_test_object;
    use crate::test_helper::setup_test_context;
    use heritage_core_db::repository::create_batch::CreateBatch;
    use heritage_core_db::repository::load::Load;

    #[tokio::test]
    async fn test_create_object() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let object_repo = &ctx.catalog_repos().heritage_object_repository;

        let object = create_test_object("Incense burner");
        object_repo.create_batch(vec![object.clone()]).await?;

        let loaded = object_repo.load(object.id).await?;
        assert_eq!(loaded.title.as_str(), "Incense burner");
        assert_eq!(loaded.region, object.region);
        assert_eq!(loaded.origin_date, object.origin_date);
        assert!(loaded.maker.is_none());

        Ok(())
    }
}
