//! The auto-approval decision consulted by both moderation queues.
//!
//! Deliberately a single signal: staff flag, superuser flag, or a profile
//! tier at or above moderator. Object sensitivity, field type and submission
//! history do not participate in the decision.

use crate::domain::identity::{ActorIdentity, PrivilegeTier};
use crate::error::{ApiError, ApiResult};

/// Whether this actor's submissions and edits bypass the moderation queue
pub fn auto_approve(actor: &ActorIdentity) -> bool {
    actor.is_staff || actor.is_superuser || actor.tier >= PrivilegeTier::Moderator
}

/// Guard for operations reserved to reviewers (manual approve/reject, bulk
/// review, direct catalog writes)
pub fn ensure_reviewer(actor: &ActorIdentity) -> ApiResult<()> {
    if auto_approve(actor) {
        Ok(())
    } else {
        Err(ApiError::Unauthorized(format!(
            "user '{}' may not review moderation queues",
            actor.username
        )))
    }
}

/// Guard for author-or-staff operations such as comment removal
pub fn ensure_author_or_staff(actor: &ActorIdentity, author_id: uuid::Uuid) -> ApiResult<()> {
    if actor.is_staff || actor.user_id == author_id {
        Ok(())
    } else {
        Err(ApiError::Unauthorized(format!(
            "user '{}' may not remove this comment",
            actor.username
        )))
    }
}
