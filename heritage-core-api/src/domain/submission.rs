use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::domain::catalog::{IchDomain, ObjectType, Region};

/// A candidate catalog entry as proposed by a community member
///
/// Carries the submission subset of the catalog shape; the remaining optional
/// metadata can only be added later through edit proposals.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewSubmission {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(max = 200))]
    pub title_ar: Option<String>,
    #[validate(length(max = 200))]
    pub title_fr: Option<String>,

    #[validate(length(min = 1))]
    pub description: String,
    pub description_ar: Option<String>,
    pub description_fr: Option<String>,

    pub region: Region,
    pub object_type: ObjectType,
    pub ich_domain: IchDomain,
    pub origin_date: NaiveDate,

    /// Storage keys handed over by the upload collaborator
    #[validate(length(max = 255))]
    pub image: Option<String>,
    #[validate(length(max = 255))]
    pub model_3d: Option<String>,

    #[validate(length(max = 255))]
    pub alternate_name: Option<String>,
    #[validate(length(max = 255))]
    pub maker: Option<String>,
    #[validate(length(max = 255))]
    pub attribution: Option<String>,
    #[validate(length(max = 255))]
    pub period: Option<String>,
    #[validate(length(max = 255))]
    pub origin_place: Option<String>,
    pub materials: Option<String>,
    #[validate(length(max = 255))]
    pub dimensions: Option<String>,
    #[validate(length(max = 255))]
    pub weight: Option<String>,
}

/// What happened to a submission at the moderation gate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmissionOutcome {
    /// Auto-approved and already converted into a catalog entry
    Published { object_id: Uuid },
    /// Persisted pending review
    Queued { submission_id: Uuid },
}

/// A reviewer's verdict in a manual or bulk review action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReviewDecision {
    Approve,
    Reject,
}

/// Result of a bulk review action
///
/// Records that failed their precondition (already reviewed, already
/// converted) are skipped with a reason rather than aborting the batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReviewOutcome {
    pub reviewed: Vec<Uuid>,
    pub skipped: Vec<(Uuid, String)>,
}
