use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::models::identifiable::Identifiable;
use heritage_core_api::domain::catalog::ReviewStatus;
use heritage_core_api::domain::patch::ObjectPatch;
use heritage_core_api::error::ApiResult;

/// Database model for a proposed partial change to a catalog entry
///
/// `data` stores the change-set exactly as received. It validated against the
/// closed editable-field set when the proposal was created, and it is
/// validated again before it is ever applied, so a row edited out-of-band
/// cannot smuggle unknown fields onto the object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditProposalModel {
    pub id: Uuid,
    pub user_id: Uuid,
    pub object_id: Uuid,

    pub note: Option<String>,
    pub data: Value,

    #[serde(
        serialize_with = "heritage_core_api::domain::catalog::serialize_review_status",
        deserialize_with = "heritage_core_api::domain::catalog::deserialize_review_status"
    )]
    pub status: ReviewStatus,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl EditProposalModel {
    /// Parse the stored change-set back into a validated patch
    pub fn patch(&self) -> ApiResult<ObjectPatch> {
        ObjectPatch::from_json(&self.data)
    }
}

impl Identifiable for EditProposalModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn stored_change_sets_revalidate_on_read() {
        let proposal = EditProposalModel {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            object_id: Uuid::new_v4(),
            note: Some("Corrected the maker attribution".to_string()),
            data: json!({"maker": "Bedouin artisan"}),
            status: ReviewStatus::Pending,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert_eq!(proposal.patch().unwrap().len(), 1);

        let tampered = EditProposalModel {
            data: json!({"no_such_field": "x"}),
            ..proposal
        };
        assert!(tampered.patch().is_err());
    }
}
