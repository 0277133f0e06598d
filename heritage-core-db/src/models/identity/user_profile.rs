use chrono::{DateTime, Utc};
use heapless::String as HeaplessString;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::identifiable::Identifiable;
use heritage_core_api::domain::identity::PrivilegeTier;

/// Database model for the extended profile attached 1:1 to a user
///
/// The rank column stores either an ordinary gamification value or one of the
/// reserved tier codes; [`UserProfileModel::tier`] is the only place that
/// interprets it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfileModel {
    /// Primary key; also the foreign key to the owning user
    pub user_id: Uuid,

    pub bio: Option<String>,

    /// Avatar delivered by the OAuth provider, overwritten on login when it
    /// changes
    pub profile_photo_url: Option<HeaplessString<200>>,

    pub rank: i32,

    pub created_at: DateTime<Utc>,
}

impl UserProfileModel {
    /// The default profile created alongside a new user
    pub fn new_for_user(user_id: Uuid, created_at: DateTime<Utc>) -> Self {
        Self {
            user_id,
            bio: None,
            profile_photo_url: None,
            rank: PrivilegeTier::Member.rank(),
            created_at,
        }
    }

    pub fn tier(&self) -> PrivilegeTier {
        PrivilegeTier::from_rank(self.rank)
    }

    /// Whether an incoming photo URL should replace the stored one
    pub fn photo_needs_update(&self, incoming: &str) -> bool {
        !incoming.is_empty()
            && self.profile_photo_url.as_ref().map(|url| url.as_str()) != Some(incoming)
    }
}

impl Identifiable for UserProfileModel {
    fn get_id(&self) -> Uuid {
        self.user_id
    }
}
