use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::domain::catalog::ReviewStatus;
use crate::domain::identity::PrivilegeTier;

/// Input for registering a user handed over by the authentication provider
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewUser {
    #[validate(length(min = 1, max = 150))]
    pub username: String,
    #[validate(email, length(max = 254))]
    pub email: Option<String>,
    pub is_staff: bool,
    pub is_superuser: bool,
}

/// Display badges derived from flags, tier and activity
///
/// Ordering matters for presentation: administrative badges come first, then
/// the named tier, then the activity badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Badge {
    SiteCreator,
    Admin,
    Expert,
    Consultant,
    Moderator,
    AdvancedDigitizer,
    IntermediateDigitizer,
    BeginnerDigitizer,
}

impl std::fmt::Display for Badge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Badge::SiteCreator => write!(f, "Site Creator"),
            Badge::Admin => write!(f, "Admin"),
            Badge::Expert => write!(f, "Expert"),
            Badge::Consultant => write!(f, "Consultant"),
            Badge::Moderator => write!(f, "Moderator"),
            Badge::AdvancedDigitizer => write!(f, "Advanced Digitizer"),
            Badge::IntermediateDigitizer => write!(f, "Intermediate Digitizer"),
            Badge::BeginnerDigitizer => write!(f, "Beginner Digitizer"),
        }
    }
}

/// Activity badge from the combined submission + comment count
pub fn activity_badge(activity_count: i64) -> Option<Badge> {
    match activity_count {
        n if n >= 100 => Some(Badge::AdvancedDigitizer),
        n if n >= 50 => Some(Badge::IntermediateDigitizer),
        n if n >= 10 => Some(Badge::BeginnerDigitizer),
        _ => None,
    }
}

/// All badges applicable to a user, administrative first
pub fn badges_for(
    is_staff: bool,
    is_superuser: bool,
    tier: PrivilegeTier,
    activity_count: i64,
) -> Vec<Badge> {
    let mut badges = Vec::new();

    if is_superuser {
        badges.push(Badge::SiteCreator);
    } else if is_staff {
        badges.push(Badge::Admin);
    }

    match tier {
        PrivilegeTier::Expert => badges.push(Badge::Expert),
        PrivilegeTier::Consultant => badges.push(Badge::Consultant),
        PrivilegeTier::Moderator => badges.push(Badge::Moderator),
        PrivilegeTier::Member => {}
    }

    if let Some(badge) = activity_badge(activity_count) {
        badges.push(badge);
    }

    badges
}

/// A user profile as displayed on dashboards and public pages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileView {
    pub user_id: Uuid,
    pub username: String,
    pub bio: Option<String>,
    pub profile_photo_url: Option<String>,
    pub tier: PrivilegeTier,
    pub badges: Vec<Badge>,
    /// Submissions plus comments, the basis for activity badges
    pub activity_count: i64,
}

/// Counters shown on the signed-in user's dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub likes: i64,
    pub comments: i64,
    pub proposals: i64,
    pub submissions: i64,
}

/// A submission line item on a dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionSummary {
    pub id: Uuid,
    pub title: String,
    pub status: ReviewStatus,
    pub created_at: DateTime<Utc>,
}

/// An edit-proposal line item on a dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalSummary {
    pub id: Uuid,
    pub object_id: Uuid,
    pub object_title: String,
    pub status: ReviewStatus,
    pub created_at: DateTime<Utc>,
}

/// The signed-in user's dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dashboard {
    pub profile: ProfileView,
    pub stats: DashboardStats,
    pub recent_submissions: Vec<SubmissionSummary>,
    pub recent_proposals: Vec<ProposalSummary>,
}

/// A catalog object the user recently liked
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikedObject {
    pub object_id: Uuid,
    pub title: String,
    pub liked_at: DateTime<Utc>,
}

/// A comment line item on a public profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentSummary {
    pub id: Uuid,
    pub object_id: Uuid,
    pub object_title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// Another user's profile page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicProfile {
    pub profile: ProfileView,
    pub likes_count: i64,
    pub comments_count: i64,
    pub recent_likes: Vec<LikedObject>,
    pub recent_comments: Vec<CommentSummary>,
}
