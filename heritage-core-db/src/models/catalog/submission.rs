use chrono::{DateTime, NaiveDate, Utc};
use heapless::String as HeaplessString;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::catalog::heritage_object::HeritageObjectModel;
use crate::models::identifiable::Identifiable;
use heritage_core_api::domain::catalog::{IchDomain, ObjectType, Region, ReviewStatus};
use heritage_core_api::domain::submission::NewSubmission;
use heritage_core_api::error::{ApiError, ApiResult};

/// Database model for a candidate catalog entry awaiting moderation
///
/// Mirrors the submission subset of the catalog shape. A submission gains
/// authority over the catalog only through the moderation policy; conversion
/// happens at most once and is recorded in `converted_object_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionModel {
    pub id: Uuid,
    pub user_id: Uuid,

    pub title: HeaplessString<200>,
    pub title_ar: Option<HeaplessString<200>>,
    pub title_fr: Option<HeaplessString<200>>,
    pub description: String,
    pub description_ar: Option<String>,
    pub description_fr: Option<String>,

    #[serde(
        serialize_with = "heritage_core_api::domain::catalog::serialize_region",
        deserialize_with = "heritage_core_api::domain::catalog::deserialize_region"
    )]
    pub region: Region,
    #[serde(
        serialize_with = "heritage_core_api::domain::catalog::serialize_object_type",
        deserialize_with = "heritage_core_api::domain::catalog::deserialize_object_type"
    )]
    pub object_type: ObjectType,
    #[serde(
        serialize_with = "heritage_core_api::domain::catalog::serialize_ich_domain",
        deserialize_with = "heritage_core_api::domain::catalog::deserialize_ich_domain"
    )]
    pub ich_domain: IchDomain,
    pub origin_date: NaiveDate,

    pub image: Option<HeaplessString<255>>,
    pub model_3d: Option<HeaplessString<255>>,

    pub alternate_name: Option<HeaplessString<255>>,
    pub maker: Option<HeaplessString<255>>,
    pub attribution: Option<HeaplessString<255>>,
    pub period: Option<HeaplessString<255>>,
    pub origin_place: Option<HeaplessString<255>>,
    pub materials: Option<String>,
    pub dimensions: Option<HeaplessString<255>>,
    pub weight: Option<HeaplessString<255>>,

    #[serde(
        serialize_with = "heritage_core_api::domain::catalog::serialize_review_status",
        deserialize_with = "heritage_core_api::domain::catalog::deserialize_review_status"
    )]
    pub status: ReviewStatus,

    /// Set once, by the conversion that published this submission
    pub converted_object_id: Option<Uuid>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SubmissionModel {
    /// Build a pending submission from validated input
    pub fn from_new(
        id: Uuid,
        user_id: Uuid,
        input: &NewSubmission,
        now: DateTime<Utc>,
    ) -> ApiResult<Self> {
        Ok(Self {
            id,
            user_id,
            title: bounded("title", &input.title)?,
            title_ar: bounded_opt("title_ar", &input.title_ar)?,
            title_fr: bounded_opt("title_fr", &input.title_fr)?,
            description: input.description.clone(),
            description_ar: input.description_ar.clone(),
            description_fr: input.description_fr.clone(),
            region: input.region,
            object_type: input.object_type,
            ich_domain: input.ich_domain,
            origin_date: input.origin_date,
            image: bounded_opt("image", &input.image)?,
            model_3d: bounded_opt("model_3d", &input.model_3d)?,
            alternate_name: bounded_opt("alternate_name", &input.alternate_name)?,
            maker: bounded_opt("maker", &input.maker)?,
            attribution: bounded_opt("attribution", &input.attribution)?,
            period: bounded_opt("period", &input.period)?,
            origin_place: bounded_opt("origin_place", &input.origin_place)?,
            materials: input.materials.clone(),
            dimensions: bounded_opt("dimensions", &input.dimensions)?,
            weight: bounded_opt("weight", &input.weight)?,
            status: ReviewStatus::Pending,
            converted_object_id: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Convert this submission into a catalog entry
    ///
    /// Preconditions: the submission is approved and has never been converted.
    /// Media keys are moved onto the catalog entry, not duplicated; fields the
    /// submission shape does not carry start out empty.
    pub fn to_heritage_object(&self, object_id: Uuid) -> ApiResult<HeritageObjectModel> {
        if self.status != ReviewStatus::Approved {
            return Err(ApiError::PreconditionViolation(format!(
                "submission {} is {} and cannot be converted",
                self.id, self.status
            )));
        }
        if let Some(existing) = self.converted_object_id {
            return Err(ApiError::PreconditionViolation(format!(
                "submission {} was already converted into object {existing}",
                self.id
            )));
        }

        Ok(HeritageObjectModel {
            id: object_id,
            title: self.title.clone(),
            title_ar: self.title_ar.clone(),
            title_fr: self.title_fr.clone(),
            description: self.description.clone(),
            description_ar: self.description_ar.clone(),
            description_fr: self.description_fr.clone(),
            region: self.region,
            object_type: self.object_type,
            ich_domain: self.ich_domain,
            origin_date: self.origin_date,
            image: self.image.clone(),
            thumbnail: None,
            model_3d: self.model_3d.clone(),
            alternate_name: self.alternate_name.clone(),
            maker: self.maker.clone(),
            attribution: self.attribution.clone(),
            copy_after: None,
            sitter: None,
            date_text: None,
            period: self.period.clone(),
            origin_place: self.origin_place.clone(),
            provenance: None,
            collector: None,
            site_name: None,
            field_identifier: None,
            materials: self.materials.clone(),
            dimensions: self.dimensions.clone(),
            weight: self.weight.clone(),
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
        })
    }
}

impl Identifiable for SubmissionModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

fn bounded<const N: usize>(field: &str, value: &str) -> ApiResult<HeaplessString<N>> {
    HeaplessString::try_from(value)
        .map_err(|_| ApiError::ValidationError(format!("value for '{field}' is too long")))
}

fn bounded_opt<const N: usize>(
    field: &str,
    value: &Option<String>,
) -> ApiResult<Option<HeaplessString<N>>> {
    value
        .as_deref()
        .map(|v| bounded(field, v))
        .transpose()
}
