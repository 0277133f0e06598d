#[cfg(test)]
pub mod test_utils {
    use chrono::{NaiveDate, Utc};
    use heapless::String as HeaplessString;
    use heritage_core_api::domain::catalog::{IchDomain, ObjectType, Region, ReviewStatus};
    use heritage_core_db::models::catalog::submission::SubmissionModel;
    use uuid::Uuid;

    pub fn create_test_submission(user_id: Uuid, title: &str) -> SubmissionModel {
        let now = Utc::now();
        SubmissionModel {
            id: Uuid::new_v4(),
            user_id,
            title: HeaplessString::try_from(title).unwrap(),
            title_ar: None,
            title_fr: None,
            description: format!("Test submission for {title}"),
            description_ar: None,
            description_fr: None,
            region: Region::Riyadh,
            object_type: ObjectType::Vessel,
            ich_domain: IchDomain::TraditionalCraftsmanship,
            origin_date: NaiveDate::from_ymd_opt(1920, 6, 1).unwrap(),
            image: None,
            model_3d: None,
            alternate_name: None,
            maker: None,
            attribution: None,
            period: None,
            origin_place: None,
            materials: None,
            dimensions: None,
            weight: None,
            status: ReviewStatus::Pending,
            converted_object_id: None,
            created_at: now,
            updated_at: now,
        }
    }
}
