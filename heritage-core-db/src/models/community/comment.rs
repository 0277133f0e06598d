use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::identifiable::Identifiable;

/// Database model for a comment on a catalog entry
///
/// Threading is a single level deep: `parent_id`, when set, always points at
/// a top-level comment on the same object. Deletion is soft; the row stays
/// for its replies and likes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentModel {
    pub id: Uuid,
    pub user_id: Uuid,
    pub object_id: Uuid,

    pub body: String,
    pub parent_id: Option<Uuid>,
    pub is_deleted: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CommentModel {
    pub fn is_reply(&self) -> bool {
        self.parent_id.is_some()
    }
}

impl Identifiable for CommentModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}
