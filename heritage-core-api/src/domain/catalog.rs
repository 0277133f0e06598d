use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

/// Database enum for the administrative regions an object can originate from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(type_name = "region", rename_all = "PascalCase"))]
pub enum Region {
    Riyadh,
    Makkah,
    Madinah,
    Qassim,
    Eastern,
    Asir,
    Tabuk,
    Hail,
    Northern,
    Jazan,
    Najran,
    Bahah,
    Jouf,
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Region::Riyadh => write!(f, "Riyadh"),
            Region::Makkah => write!(f, "Makkah"),
            Region::Madinah => write!(f, "Madinah"),
            Region::Qassim => write!(f, "Qassim"),
            Region::Eastern => write!(f, "Eastern"),
            Region::Asir => write!(f, "Asir"),
            Region::Tabuk => write!(f, "Tabuk"),
            Region::Hail => write!(f, "Hail"),
            Region::Northern => write!(f, "Northern"),
            Region::Jazan => write!(f, "Jazan"),
            Region::Najran => write!(f, "Najran"),
            Region::Bahah => write!(f, "Bahah"),
            Region::Jouf => write!(f, "Jouf"),
        }
    }
}

impl FromStr for Region {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Riyadh" => Ok(Region::Riyadh),
            "Makkah" => Ok(Region::Makkah),
            "Madinah" => Ok(Region::Madinah),
            "Qassim" => Ok(Region::Qassim),
            "Eastern" => Ok(Region::Eastern),
            "Asir" => Ok(Region::Asir),
            "Tabuk" => Ok(Region::Tabuk),
            "Hail" => Ok(Region::Hail),
            "Northern" => Ok(Region::Northern),
            "Jazan" => Ok(Region::Jazan),
            "Najran" => Ok(Region::Najran),
            "Bahah" => Ok(Region::Bahah),
            "Jouf" => Ok(Region::Jouf),
            _ => Err(()),
        }
    }
}

/// Database enum for the kind of heritage object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(type_name = "object_type", rename_all = "PascalCase"))]
pub enum ObjectType {
    Tool,
    Vessel,
    Textile,
    Jewellery,
    Furniture,
    Ceramic,
    MusicalInstrument,
    Architecture,
    Manuscript,
    Other,
    /// Kept for legacy records entered through the back office
    ArchitectureElement,
}

impl std::fmt::Display for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ObjectType::Tool => write!(f, "Tool"),
            ObjectType::Vessel => write!(f, "Vessel"),
            ObjectType::Textile => write!(f, "Textile"),
            ObjectType::Jewellery => write!(f, "Jewellery"),
            ObjectType::Furniture => write!(f, "Furniture"),
            ObjectType::Ceramic => write!(f, "Ceramic"),
            ObjectType::MusicalInstrument => write!(f, "MusicalInstrument"),
            ObjectType::Architecture => write!(f, "Architecture"),
            ObjectType::Manuscript => write!(f, "Manuscript"),
            ObjectType::Other => write!(f, "Other"),
            ObjectType::ArchitectureElement => write!(f, "ArchitectureElement"),
        }
    }
}

impl FromStr for ObjectType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Tool" => Ok(ObjectType::Tool),
            "Vessel" => Ok(ObjectType::Vessel),
            "Textile" => Ok(ObjectType::Textile),
            "Jewellery" => Ok(ObjectType::Jewellery),
            "Furniture" => Ok(ObjectType::Furniture),
            "Ceramic" => Ok(ObjectType::Ceramic),
            "MusicalInstrument" => Ok(ObjectType::MusicalInstrument),
            "Architecture" => Ok(ObjectType::Architecture),
            "Manuscript" => Ok(ObjectType::Manuscript),
            "Other" => Ok(ObjectType::Other),
            "ArchitectureElement" => Ok(ObjectType::ArchitectureElement),
            _ => Err(()),
        }
    }
}

/// Database enum for the UNESCO intangible-cultural-heritage domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(type_name = "ich_domain", rename_all = "PascalCase"))]
pub enum IchDomain {
    OralTraditions,
    PerformingArts,
    SocialPractices,
    NatureKnowledge,
    TraditionalCraftsmanship,
}

impl std::fmt::Display for IchDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IchDomain::OralTraditions => write!(f, "OralTraditions"),
            IchDomain::PerformingArts => write!(f, "PerformingArts"),
            IchDomain::SocialPractices => write!(f, "SocialPractices"),
            IchDomain::NatureKnowledge => write!(f, "NatureKnowledge"),
            IchDomain::TraditionalCraftsmanship => write!(f, "TraditionalCraftsmanship"),
        }
    }
}

impl FromStr for IchDomain {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "OralTraditions" => Ok(IchDomain::OralTraditions),
            "PerformingArts" => Ok(IchDomain::PerformingArts),
            "SocialPractices" => Ok(IchDomain::SocialPractices),
            "NatureKnowledge" => Ok(IchDomain::NatureKnowledge),
            "TraditionalCraftsmanship" => Ok(IchDomain::TraditionalCraftsmanship),
            _ => Err(()),
        }
    }
}

/// Database enum for the moderation status of submissions and edit proposals
///
/// Transitions are one-way: Pending -> Approved or Pending -> Rejected.
/// Both outcomes are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(type_name = "review_status", rename_all = "PascalCase"))]
pub enum ReviewStatus {
    Pending,
    Approved,
    Rejected,
}

impl ReviewStatus {
    /// Whether a transition from `self` to `next` is allowed
    pub fn can_transition_to(&self, next: ReviewStatus) -> bool {
        matches!(
            (self, next),
            (ReviewStatus::Pending, ReviewStatus::Approved)
                | (ReviewStatus::Pending, ReviewStatus::Rejected)
        )
    }
}

impl std::fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReviewStatus::Pending => write!(f, "Pending"),
            ReviewStatus::Approved => write!(f, "Approved"),
            ReviewStatus::Rejected => write!(f, "Rejected"),
        }
    }
}

impl FromStr for ReviewStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(ReviewStatus::Pending),
            "Approved" => Ok(ReviewStatus::Approved),
            "Rejected" => Ok(ReviewStatus::Rejected),
            _ => Err(()),
        }
    }
}

/// Display language for trilingual titles and descriptions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    English,
    Arabic,
    French,
}

/// Combined browse filter over the published catalog
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogFilter {
    pub region: Option<Region>,
    pub object_type: Option<ObjectType>,
    /// Case-insensitive substring match against the English title
    pub query: Option<String>,
}

impl CatalogFilter {
    pub fn is_empty(&self) -> bool {
        self.region.is_none()
            && self.object_type.is_none()
            && self.query.as_deref().map(str::trim).unwrap_or("").is_empty()
    }
}

// ============================================================================
// CUSTOM SERIALIZATION FUNCTIONS
// ============================================================================

pub fn serialize_region<S>(value: &Region, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.to_string())
}

pub fn deserialize_region<'de, D>(deserializer: D) -> Result<Region, D::Error>
where
    D: Deserializer<'de>,
{
    let value_str = String::deserialize(deserializer)?;
    Region::from_str(&value_str)
        .map_err(|_| serde::de::Error::custom(format!("Invalid Region: {value_str}")))
}

pub fn serialize_object_type<S>(value: &ObjectType, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.to_string())
}

pub fn deserialize_object_type<'de, D>(deserializer: D) -> Result<ObjectType, D::Error>
where
    D: Deserializer<'de>,
{
    let value_str = String::deserialize(deserializer)?;
    ObjectType::from_str(&value_str)
        .map_err(|_| serde::de::Error::custom(format!("Invalid ObjectType: {value_str}")))
}

pub fn serialize_ich_domain<S>(value: &IchDomain, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.to_string())
}

pub fn deserialize_ich_domain<'de, D>(deserializer: D) -> Result<IchDomain, D::Error>
where
    D: Deserializer<'de>,
{
    let value_str = String::deserialize(deserializer)?;
    IchDomain::from_str(&value_str)
        .map_err(|_| serde::de::Error::custom(format!("Invalid IchDomain: {value_str}")))
}

pub fn serialize_review_status<S>(value: &ReviewStatus, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.to_string())
}

pub fn deserialize_review_status<'de, D>(deserializer: D) -> Result<ReviewStatus, D::Error>
where
    D: Deserializer<'de>,
{
    let value_str = String::deserialize(deserializer)?;
    ReviewStatus::from_str(&value_str)
        .map_err(|_| serde::de::Error::custom(format!("Invalid ReviewStatus: {value_str}")))
}
