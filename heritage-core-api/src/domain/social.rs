use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::domain::identity::PrivilegeTier;

/// Input for posting a comment or a reply
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewComment {
    #[validate(length(min = 1))]
    pub body: String,
}

/// Result of a like toggle, for objects and comments alike
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeOutcome {
    /// Whether the like exists after the toggle
    pub liked: bool,
    pub like_count: i64,
}

/// Aggregate stats shown next to a comment author, computed on read
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorStats {
    /// Non-deleted comments written by the author
    pub total_comments: i64,
    /// Likes received across all of the author's comments
    pub total_likes_received: i64,
}

/// Comment author as displayed in a thread
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentAuthor {
    pub user_id: Uuid,
    pub username: String,
    pub profile_photo_url: Option<String>,
    pub tier: PrivilegeTier,
    pub stats: AuthorStats,
}

/// A single rendered comment or reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentView {
    pub id: Uuid,
    pub object_id: Uuid,
    pub author: CommentAuthor,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub like_count: i64,
    /// Whether the viewing identity has liked this comment
    pub viewer_liked: bool,
}

/// A top-level comment with its replies attached
///
/// Replies are a single level deep; a reply's parent is always a top-level
/// comment on the same object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentThread {
    pub comment: CommentView,
    pub replies: Vec<CommentView>,
}
