use chrono::{DateTime, Utc};
use heapless::String as HeaplessString;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::identifiable::Identifiable;
use crate::models::index::Index;
use crate::models::indexable::Indexable;
use crate::utils::hash_as_i64;
use heritage_core_api::domain::identity::ActorIdentity;

use super::user_profile::UserProfileModel;

/// Database model for a registered account
///
/// Identity is established by the external authentication collaborator; this
/// record carries only what moderation and display need. Every user owns
/// exactly one profile, created in the same transaction as the user row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppUserModel {
    pub id: Uuid,

    /// Unique handle; looked up through the hashed index table
    pub username: HeaplessString<150>,

    pub email: Option<HeaplessString<254>>,

    pub is_staff: bool,
    pub is_superuser: bool,

    pub date_joined: DateTime<Utc>,
}

impl AppUserModel {
    /// The explicit identity handed into every moderation and social operation
    pub fn actor_identity(&self, profile: &UserProfileModel) -> ActorIdentity {
        ActorIdentity::new(
            self.id,
            self.username.as_str(),
            self.is_staff,
            self.is_superuser,
            profile.tier(),
        )
    }
}

/// Index model for hashed username lookup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppUserIdxModel {
    pub id: Uuid,
    pub username_hash: i64,
}

impl Identifiable for AppUserModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

impl Identifiable for AppUserIdxModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

impl Index for AppUserIdxModel {}

impl Indexable for AppUserModel {
    type IndexType = AppUserIdxModel;

    fn to_index(&self) -> Self::IndexType {
        AppUserIdxModel {
            id: self.id,
            username_hash: hash_as_i64(&self.username.as_str()),
        }
    }
}
