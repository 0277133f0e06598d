use chrono::NaiveDate;
use heapless::String as HeaplessString;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::identifiable::Identifiable;
use heritage_core_api::domain::catalog::{IchDomain, Language, ObjectType, Region};
use heritage_core_api::domain::patch::{EditableField, FieldPatch, ObjectPatch, PatchValue};
use heritage_core_api::error::{ApiError, ApiResult};

/// Database model for a published catalog entry
///
/// The single source of truth for published content. Rows are created by
/// staff directly or by converting an approved submission, and mutated by
/// direct edit or an approved edit proposal. Never soft-deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeritageObjectModel {
    pub id: Uuid,

    // Core trilingual fields; English is required, the rest fall back to it
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

    /// Storage keys owned by the media collaborator
    pub image: Option<HeaplessString<255>>,
    pub thumbnail: Option<HeaplessString<255>>,
    pub model_3d: Option<HeaplessString<255>>,

    // Identification (optional)
    pub alternate_name: Option<HeaplessString<255>>,
    pub maker: Option<HeaplessString<255>>,
    pub attribution: Option<HeaplessString<255>>,
    pub copy_after: Option<HeaplessString<255>>,
    pub sitter: Option<HeaplessString<255>>,
    pub date_text: Option<HeaplessString<255>>,
    pub period: Option<HeaplessString<255>>,
    pub origin_place: Option<HeaplessString<255>>,

    // Provenance & collecting (optional)
    pub provenance: Option<String>,
    pub collector: Option<HeaplessString<255>>,
    pub site_name: Option<HeaplessString<255>>,
    pub field_identifier: Option<HeaplessString<255>>,

    // Materials & measurements (optional)
    pub materials: Option<String>,
    pub dimensions: Option<HeaplessString<255>>,
    pub weight: Option<HeaplessString<255>>,
    pub taxon: Option<HeaplessString<255>>,

    // Collection & display (optional)
    pub collection_name: Option<HeaplessString<255>>,
    pub on_view_location: Option<HeaplessString<255>>,
    pub exhibition_history: Option<String>,

    // Source, rights & identifiers (optional)
    pub credit_line: Option<HeaplessString<255>>,
    pub data_source: Option<HeaplessString<255>>,
    pub rights: Option<HeaplessString<255>>,
    pub accession_number: Option<HeaplessString<255>>,
    pub object_number: Option<HeaplessString<255>>,
    pub record_id: Option<HeaplessString<255>>,
    pub metadata_usage: Option<HeaplessString<255>>,
    pub guid: Option<HeaplessString<200>>,
    pub related_resource: Option<HeaplessString<200>>,
}

impl HeritageObjectModel {
    /// Title in the requested language, falling back to English
    pub fn title_for(&self, language: Language) -> &str {
        match language {
            Language::Arabic => self
                .title_ar
                .as_ref()
                .map(|t| t.as_str())
                .unwrap_or(self.title.as_str()),
            Language::French => self
                .title_fr
                .as_ref()
                .map(|t| t.as_str())
                .unwrap_or(self.title.as_str()),
            Language::English => self.title.as_str(),
        }
    }

    /// Description in the requested language, falling back to English
    pub fn description_for(&self, language: Language) -> &str {
        match language {
            Language::Arabic => self
                .description_ar
                .as_deref()
                .unwrap_or(&self.description),
            Language::French => self
                .description_fr
                .as_deref()
                .unwrap_or(&self.description),
            Language::English => &self.description,
        }
    }

    /// Apply a validated change-set to this object
    ///
    /// Sets exactly the named fields and nothing else. The patch has already
    /// been validated against the closed editable-field set, so a value that
    /// does not fit its field indicates a bug rather than bad input.
    pub fn apply_patch(&mut self, patch: &ObjectPatch) -> ApiResult<()> {
        for change in patch.changes() {
            self.apply_field(change)?;
        }
        Ok(())
    }

    fn apply_field(&mut self, change: &FieldPatch) -> ApiResult<()> {
        use EditableField as F;
        use PatchValue as V;

        match (change.field, &change.value) {
            (F::Title, V::Text(v)) => self.title = bounded(change.field, v)?,
            (F::TitleAr, V::Text(v)) => self.title_ar = Some(bounded(change.field, v)?),
            (F::TitleAr, V::Clear) => self.title_ar = None,
            (F::TitleFr, V::Text(v)) => self.title_fr = Some(bounded(change.field, v)?),
            (F::TitleFr, V::Clear) => self.title_fr = None,
            (F::Description, V::Text(v)) => self.description = v.clone(),
            (F::DescriptionAr, V::Text(v)) => self.description_ar = Some(v.clone()),
            (F::DescriptionAr, V::Clear) => self.description_ar = None,
            (F::DescriptionFr, V::Text(v)) => self.description_fr = Some(v.clone()),
            (F::DescriptionFr, V::Clear) => self.description_fr = None,
            (F::Region, V::Region(v)) => self.region = *v,
            (F::ObjectType, V::ObjectType(v)) => self.object_type = *v,
            (F::IchDomain, V::IchDomain(v)) => self.ich_domain = *v,
            (F::OriginDate, V::Date(v)) => self.origin_date = *v,
            (F::AlternateName, V::Text(v)) => {
                self.alternate_name = Some(bounded(change.field, v)?)
            }
            (F::AlternateName, V::Clear) => self.alternate_name = None,
            (F::Maker, V::Text(v)) => self.maker = Some(bounded(change.field, v)?),
            (F::Maker, V::Clear) => self.maker = None,
            (F::Attribution, V::Text(v)) => self.attribution = Some(bounded(change.field, v)?),
            (F::Attribution, V::Clear) => self.attribution = None,
            (F::Period, V::Text(v)) => self.period = Some(bounded(change.field, v)?),
            (F::Period, V::Clear) => self.period = None,
            (F::OriginPlace, V::Text(v)) => self.origin_place = Some(bounded(change.field, v)?),
            (F::OriginPlace, V::Clear) => self.origin_place = None,
            (F::Materials, V::Text(v)) => self.materials = Some(v.clone()),
            (F::Materials, V::Clear) => self.materials = None,
            (F::Dimensions, V::Text(v)) => self.dimensions = Some(bounded(change.field, v)?),
            (F::Dimensions, V::Clear) => self.dimensions = None,
            (F::Weight, V::Text(v)) => self.weight = Some(bounded(change.field, v)?),
            (F::Weight, V::Clear) => self.weight = None,
            (field, value) => {
                return Err(ApiError::InternalError(format!(
                    "change-set value {value:?} does not fit field '{field}'"
                )))
            }
        }
        Ok(())
    }
}

impl Identifiable for HeritageObjectModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

fn bounded<const N: usize>(field: EditableField, value: &str) -> ApiResult<HeaplessString<N>> {
    HeaplessString::try_from(value)
        .map_err(|_| ApiError::ValidationError(format!("value for '{field}' is too long")))
}
