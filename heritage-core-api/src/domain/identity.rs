use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// Rank value at which the moderation bypass begins
const MODERATOR_RANK: i32 = 997;
const CONSULTANT_RANK: i32 = 998;
const EXPERT_RANK: i32 = 999;

/// Named privilege tiers backing the profile rank column
///
/// Ranks below the moderator threshold are ordinary members regardless of the
/// numeric value; the three named tiers map to the reserved rank codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PrivilegeTier {
    Member,
    Moderator,
    Consultant,
    Expert,
}

impl PrivilegeTier {
    /// Map a stored profile rank onto its tier
    pub fn from_rank(rank: i32) -> Self {
        match rank {
            r if r >= EXPERT_RANK => PrivilegeTier::Expert,
            CONSULTANT_RANK => PrivilegeTier::Consultant,
            MODERATOR_RANK => PrivilegeTier::Moderator,
            _ => PrivilegeTier::Member,
        }
    }

    /// The reserved rank code for a named tier, or the default member rank
    pub fn rank(&self) -> i32 {
        match self {
            PrivilegeTier::Member => 1,
            PrivilegeTier::Moderator => MODERATOR_RANK,
            PrivilegeTier::Consultant => CONSULTANT_RANK,
            PrivilegeTier::Expert => EXPERT_RANK,
        }
    }
}

impl std::fmt::Display for PrivilegeTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PrivilegeTier::Member => write!(f, "Member"),
            PrivilegeTier::Moderator => write!(f, "Moderator"),
            PrivilegeTier::Consultant => write!(f, "Consultant"),
            PrivilegeTier::Expert => write!(f, "Expert"),
        }
    }
}

impl FromStr for PrivilegeTier {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Member" => Ok(PrivilegeTier::Member),
            "Moderator" => Ok(PrivilegeTier::Moderator),
            "Consultant" => Ok(PrivilegeTier::Consultant),
            "Expert" => Ok(PrivilegeTier::Expert),
            _ => Err(()),
        }
    }
}

/// The authenticated identity acting on a request
///
/// Every moderation and social operation takes this explicitly; there is no
/// ambient current-user state anywhere in the core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorIdentity {
    pub user_id: Uuid,
    pub username: String,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub tier: PrivilegeTier,
}

impl ActorIdentity {
    pub fn new(
        user_id: Uuid,
        username: impl Into<String>,
        is_staff: bool,
        is_superuser: bool,
        tier: PrivilegeTier,
    ) -> Self {
        Self {
            user_id,
            username: username.into(),
            is_staff,
            is_superuser,
            tier,
        }
    }
}
