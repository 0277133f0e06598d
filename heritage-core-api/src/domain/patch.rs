use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

use crate::domain::catalog::{IchDomain, ObjectType, Region};
use crate::error::{ApiError, ApiResult, FieldError};

/// The closed set of catalog fields an edit proposal may touch
///
/// Change-sets arrive as free-form JSON maps; every key must parse into this
/// enumeration before anything is persisted or applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EditableField {
    Title,
    TitleAr,
    TitleFr,
    Description,
    DescriptionAr,
    DescriptionFr,
    Region,
    ObjectType,
    IchDomain,
    OriginDate,
    AlternateName,
    Maker,
    Attribution,
    Period,
    OriginPlace,
    Materials,
    Dimensions,
    Weight,
}

impl EditableField {
    pub const ALL: [EditableField; 18] = [
        EditableField::Title,
        EditableField::TitleAr,
        EditableField::TitleFr,
        EditableField::Description,
        EditableField::DescriptionAr,
        EditableField::DescriptionFr,
        EditableField::Region,
        EditableField::ObjectType,
        EditableField::IchDomain,
        EditableField::OriginDate,
        EditableField::AlternateName,
        EditableField::Maker,
        EditableField::Attribution,
        EditableField::Period,
        EditableField::OriginPlace,
        EditableField::Materials,
        EditableField::Dimensions,
        EditableField::Weight,
    ];

    /// The change-set key and column name for this field
    pub fn as_str(&self) -> &'static str {
        match self {
            EditableField::Title => "title",
            EditableField::TitleAr => "title_ar",
            EditableField::TitleFr => "title_fr",
            EditableField::Description => "description",
            EditableField::DescriptionAr => "description_ar",
            EditableField::DescriptionFr => "description_fr",
            EditableField::Region => "region",
            EditableField::ObjectType => "object_type",
            EditableField::IchDomain => "ich_domain",
            EditableField::OriginDate => "origin_date",
            EditableField::AlternateName => "alternate_name",
            EditableField::Maker => "maker",
            EditableField::Attribution => "attribution",
            EditableField::Period => "period",
            EditableField::OriginPlace => "origin_place",
            EditableField::Materials => "materials",
            EditableField::Dimensions => "dimensions",
            EditableField::Weight => "weight",
        }
    }

    /// Required fields can be replaced but never cleared
    pub fn is_required(&self) -> bool {
        matches!(
            self,
            EditableField::Title
                | EditableField::Description
                | EditableField::Region
                | EditableField::ObjectType
                | EditableField::IchDomain
                | EditableField::OriginDate
        )
    }

    /// Column limit for VARCHAR-backed fields; None for TEXT columns
    fn max_len(&self) -> Option<usize> {
        match self {
            EditableField::Title | EditableField::TitleAr | EditableField::TitleFr => Some(200),
            EditableField::Description
            | EditableField::DescriptionAr
            | EditableField::DescriptionFr
            | EditableField::Materials => None,
            EditableField::Region
            | EditableField::ObjectType
            | EditableField::IchDomain
            | EditableField::OriginDate => None,
            _ => Some(255),
        }
    }
}

impl std::fmt::Display for EditableField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EditableField {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EditableField::ALL
            .iter()
            .copied()
            .find(|field| field.as_str() == s)
            .ok_or(())
    }
}

/// A typed replacement value for a single editable field
#[derive(Debug, Clone, PartialEq)]
pub enum PatchValue {
    Text(String),
    Region(Region),
    ObjectType(ObjectType),
    IchDomain(IchDomain),
    Date(NaiveDate),
    /// Reset an optional field to NULL
    Clear,
}

/// One validated field change
#[derive(Debug, Clone, PartialEq)]
pub struct FieldPatch {
    pub field: EditableField,
    pub value: PatchValue,
}

/// A validated change-set ready to be applied to a catalog object
///
/// Construction is the only validation point: a patch that exists is a patch
/// whose keys are all known, whose values all parse, and which touches at
/// least one field.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectPatch {
    changes: Vec<FieldPatch>,
}

impl ObjectPatch {
    /// Parse and validate a raw change-set map
    ///
    /// Problems are collected per field and reported together rather than
    /// failing on the first bad entry.
    pub fn from_json(data: &Value) -> ApiResult<Self> {
        let map = data.as_object().ok_or_else(|| {
            ApiError::ValidationError("proposed changes must be a JSON object".to_string())
        })?;

        let mut changes = Vec::with_capacity(map.len());
        let mut errors = Vec::new();

        for (key, raw) in map {
            let field = match EditableField::from_str(key) {
                Ok(field) => field,
                Err(()) => {
                    errors.push(FieldError::new(key.as_str(), "unknown field"));
                    continue;
                }
            };
            match parse_value(field, raw) {
                Ok(value) => changes.push(FieldPatch { field, value }),
                Err(message) => errors.push(FieldError::new(key.as_str(), message)),
            }
        }

        if !errors.is_empty() {
            return Err(ApiError::FieldErrors(errors));
        }
        if changes.is_empty() {
            return Err(ApiError::ValidationError("no changes detected".to_string()));
        }

        Ok(Self { changes })
    }

    pub fn changes(&self) -> &[FieldPatch] {
        &self.changes
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}

fn parse_value(field: EditableField, raw: &Value) -> Result<PatchValue, String> {
    let text = match raw {
        Value::Null => None,
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed)
            }
        }
        _ => return Err("expected a string value".to_string()),
    };

    let Some(text) = text else {
        return if field.is_required() {
            Err("required field cannot be cleared".to_string())
        } else {
            Ok(PatchValue::Clear)
        };
    };

    match field {
        EditableField::Region => Region::from_str(text)
            .map(PatchValue::Region)
            .map_err(|_| format!("'{text}' is not a valid region")),
        EditableField::ObjectType => ObjectType::from_str(text)
            .map(PatchValue::ObjectType)
            .map_err(|_| format!("'{text}' is not a valid object type")),
        EditableField::IchDomain => IchDomain::from_str(text)
            .map(PatchValue::IchDomain)
            .map_err(|_| format!("'{text}' is not a valid ICH domain")),
        EditableField::OriginDate => NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .map(PatchValue::Date)
            .map_err(|_| format!("'{text}' is not a valid date (expected YYYY-MM-DD)")),
        _ => {
            if let Some(max) = field.max_len() {
                if text.chars().count() > max {
                    return Err(format!("must be at most {max} characters"));
                }
            }
            Ok(PatchValue::Text(text.to_string()))
        }
    }
}
