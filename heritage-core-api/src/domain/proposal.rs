use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// A partial change-set targeted at an existing catalog entry
///
/// `data` holds the raw field-name to new-value map exactly as received; it
/// must validate through [`crate::domain::patch::ObjectPatch`] before it is
/// persisted or applied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEditProposal {
    pub object_id: Uuid,
    pub data: Value,
    pub note: Option<String>,
}

/// What happened to an edit proposal at the moderation gate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProposalOutcome {
    /// Auto-approved: the change-set is already applied to the target
    Applied { proposal_id: Uuid },
    /// Persisted pending review; the target is untouched
    Queued { proposal_id: Uuid },
}
