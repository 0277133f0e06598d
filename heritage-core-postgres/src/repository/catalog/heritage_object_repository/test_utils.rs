#[cfg(test)]
pub mod test_utils {
    use chrono::NaiveDate;
    use heapless::String as HeaplessString;
    use heritage_core_api::domain::catalog::{IchDomain, ObjectType, Region};
    use heritage_core_db::models::catalog::heritage_object::HeritageObjectModel;
    use uuid::Uuid;

    pub fn create_test_object(title: &str) -> HeritageObjectModel {
        HeritageObjectModel {
            id: Uuid::new_v4(),
            title: HeaplessString::try_from(title).unwrap(),
            title_ar: None,
            title_fr: None,
            description: format!("Test description for {title}"),
            description_ar: None,
            description_fr: None,
            region: Region::Riyadh,
            object_type: ObjectType::Tool,
            ich_domain: IchDomain::TraditionalCraftsmanship,
            origin_date: NaiveDate::from_ymd_opt(1900, 1, 1).unwrap(),
            image: None,
            thumbnail: None,
            model_3d: None,
            alternate_name: None,
            maker: None,
            attribution: None,
            copy_after: None,
            sitter: None,
            date_text: None,
            period: None,
            origin_place: None,
            provenance: None,
            collector: None,
            site_name: None,
            field_identifier: None,
            materials: None,
            dimensions: None,
            weight: None,
            taxon: None,
            collection_name: None,
            on_view_location: None,
            exhibition_history: None,
            credit_line: None,
            data_source: None,
            rights: None,
            accession_number: None,
            object_number: None,
            record_id: None,
            metadata_usage: None,
            guid: None,
            related_resource: None,
        }
    }
}
