use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::identifiable::Identifiable;

/// Database model for a like on a catalog entry
///
/// At most one row per (user, object); the unique constraint is what makes
/// concurrent toggles resolve to a consistent state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeritageLikeModel {
    pub id: Uuid,
    pub user_id: Uuid,
    pub object_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Database model for a like on a comment
///
/// Same uniqueness rule as object likes, keyed by (user, comment).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentLikeModel {
    pub id: Uuid,
    pub user_id: Uuid,
    pub comment_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Identifiable for HeritageLikeModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

impl Identifiable for CommentLikeModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}
