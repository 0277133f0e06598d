//! Likes and threaded comments over published catalog entries.
//!
//! Independent of the moderation queues: the only authority checks here are
//! "authenticated" (an [`ActorIdentity`] exists) and author-or-staff for
//! comment removal.

use chrono::Utc;
use heritage_core_api::domain::identity::ActorIdentity;
use heritage_core_api::domain::social::{
    AuthorStats, CommentAuthor, CommentThread, CommentView, LikeOutcome, NewComment,
};
use heritage_core_api::error::{ApiError, ApiResult};
use heritage_core_api::service::moderation_policy::ensure_author_or_staff;
use heritage_core_db::models::community::comment::CommentModel;
use heritage_core_db::models::identity::app_user::AppUserModel;
use heritage_core_db::models::identity::user_profile::UserProfileModel;
use heritage_core_db::repository::create_batch::CreateBatch;
use heritage_core_db::repository::exist_by_ids::ExistByIds;
use heritage_core_db::repository::load_batch::LoadBatch;
use std::collections::{HashMap, HashSet};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::postgres_repositories::RepositorySession;

pub struct SocialService;

impl SocialService {
    /// Toggle the acting user's like on a catalog entry
    pub async fn toggle_object_like(
        session: &RepositorySession,
        actor: &ActorIdentity,
        object_id: Uuid,
    ) -> ApiResult<LikeOutcome> {
        Self::ensure_object_exists(session, object_id).await?;

        let liked = session
            .community
            .heritage_like_repository
            .toggle(actor.user_id, object_id, Utc::now())
            .await?;
        let like_count = session
            .community
            .heritage_like_repository
            .count_by_object_id(object_id)
            .await?;

        info!(%object_id, user = %actor.username, liked, "object like toggled");
        Ok(LikeOutcome { liked, like_count })
    }

    /// Toggle the acting user's like on a visible comment
    pub async fn toggle_comment_like(
        session: &RepositorySession,
        actor: &ActorIdentity,
        comment_id: Uuid,
    ) -> ApiResult<LikeOutcome> {
        let comment = Self::load_comment(session, comment_id).await?;
        if comment.is_deleted {
            return Err(ApiError::NotFound(format!("comment {comment_id}")));
        }

        let liked = session
            .community
            .comment_like_repository
            .toggle(actor.user_id, comment_id, Utc::now())
            .await?;
        let like_count = session
            .community
            .comment_like_repository
            .count_by_comment_id(comment_id)
            .await?;

        info!(%comment_id, user = %actor.username, liked, "comment like toggled");
        Ok(LikeOutcome { liked, like_count })
    }

    /// Post a top-level comment on a catalog entry
    pub async fn post_comment(
        session: &RepositorySession,
        actor: &ActorIdentity,
        object_id: Uuid,
        input: &NewComment,
    ) -> ApiResult<CommentView> {
        let body = Self::clean_body(input)?;
        Self::ensure_object_exists(session, object_id).await?;

        let now = Utc::now();
        let comment = CommentModel {
            id: Uuid::new_v4(),
            user_id: actor.user_id,
            object_id,
            body,
            parent_id: None,
            is_deleted: false,
            created_at: now,
            updated_at: now,
        };
        session
            .community
            .comment_repository
            .create_batch(vec![comment.clone()])
            .await?;

        info!(comment_id = %comment.id, %object_id, user = %actor.username, "comment posted");
        Self::view_for_new_comment(session, comment).await
    }

    /// Post a reply to a top-level comment
    ///
    /// Replies are a single level deep; replying to a reply is refused, and
    /// the reply always targets the parent's object.
    pub async fn post_reply(
        session: &RepositorySession,
        actor: &ActorIdentity,
        parent_comment_id: Uuid,
        input: &NewComment,
    ) -> ApiResult<CommentView> {
        let body = Self::clean_body(input)?;

        let parent = Self::load_comment(session, parent_comment_id).await?;
        if parent.is_deleted {
            return Err(ApiError::NotFound(format!("comment {parent_comment_id}")));
        }
        if parent.is_reply() {
            return Err(ApiError::ValidationError(
                "replies cannot be nested; reply to the top-level comment instead".to_string(),
            ));
        }

        let now = Utc::now();
        let reply = CommentModel {
            id: Uuid::new_v4(),
            user_id: actor.user_id,
            object_id: parent.object_id,
            body,
            parent_id: Some(parent.id),
            is_deleted: false,
            created_at: now,
            updated_at: now,
        };
        session
            .community
            .comment_repository
            .create_batch(vec![reply.clone()])
            .await?;

        info!(reply_id = %reply.id, parent_id = %parent.id, user = %actor.username, "reply posted");
        Self::view_for_new_comment(session, reply).await
    }

    /// Soft-delete a comment; author or staff only
    pub async fn delete_comment(
        session: &RepositorySession,
        actor: &ActorIdentity,
        comment_id: Uuid,
    ) -> ApiResult<()> {
        let comment = Self::load_comment(session, comment_id).await?;
        ensure_author_or_staff(actor, comment.user_id)?;

        session
            .community
            .comment_repository
            .soft_delete(comment_id, Utc::now())
            .await?;

        info!(%comment_id, user = %actor.username, "comment removed");
        Ok(())
    }

    /// The visible comment threads for an object
    ///
    /// Top-level comments ordered by like count then recency, each carrying
    /// its visible replies (oldest first), author stats computed on read, and
    /// the viewer's liked flags.
    pub async fn list_comments(
        session: &RepositorySession,
        object_id: Uuid,
        viewer: Option<&ActorIdentity>,
    ) -> ApiResult<Vec<CommentThread>> {
        Self::ensure_object_exists(session, object_id).await?;

        let top_level = session
            .community
            .comment_repository
            .find_top_level_by_object_id(object_id)
            .await?;
        let parent_ids: Vec<Uuid> = top_level.iter().map(|(c, _)| c.id).collect();
        let replies = session
            .community
            .comment_repository
            .find_replies_by_parent_ids(&parent_ids)
            .await?;

        let all_comment_ids: Vec<Uuid> = top_level
            .iter()
            .chain(replies.iter())
            .map(|(c, _)| c.id)
            .collect();
        let liked_ids = match viewer {
            Some(viewer) => {
                session
                    .community
                    .comment_like_repository
                    .liked_comment_ids(viewer.user_id, &all_comment_ids)
                    .await?
            }
            None => HashSet::new(),
        };

        let authors = Self::load_authors(
            session,
            top_level.iter().chain(replies.iter()).map(|(c, _)| c.user_id),
        )
        .await?;

        let mut replies_by_parent: HashMap<Uuid, Vec<CommentView>> = HashMap::new();
        for (reply, like_count) in replies {
            let parent_id = reply
                .parent_id
                .ok_or_else(|| ApiError::InternalError("reply without a parent".to_string()))?;
            let view = Self::build_view(reply, like_count, &authors, &liked_ids)?;
            replies_by_parent.entry(parent_id).or_default().push(view);
        }

        let mut threads = Vec::with_capacity(top_level.len());
        for (comment, like_count) in top_level {
            let id = comment.id;
            let view = Self::build_view(comment, like_count, &authors, &liked_ids)?;
            threads.push(CommentThread {
                comment: view,
                replies: replies_by_parent.remove(&id).unwrap_or_default(),
            });
        }
        Ok(threads)
    }

    /// Aggregate stats for one comment author
    pub async fn author_stats(
        session: &RepositorySession,
        user_id: Uuid,
    ) -> ApiResult<AuthorStats> {
        Ok(session
            .community
            .comment_repository
            .author_stats(user_id)
            .await?)
    }

    fn clean_body(input: &NewComment) -> ApiResult<String> {
        input
            .validate()
            .map_err(|e| ApiError::ValidationError(e.to_string()))?;
        let body = input.body.trim();
        if body.is_empty() {
            return Err(ApiError::ValidationError(
                "comment body cannot be empty".to_string(),
            ));
        }
        Ok(body.to_string())
    }

    async fn ensure_object_exists(
        session: &RepositorySession,
        object_id: Uuid,
    ) -> ApiResult<()> {
        let exists = session
            .catalog
            .heritage_object_repository
            .exist_by_ids(&[object_id])
            .await?;
        if exists.first().map(|(_, found)| *found) != Some(true) {
            return Err(ApiError::NotFound(format!("heritage object {object_id}")));
        }
        Ok(())
    }

    async fn load_comment(
        session: &RepositorySession,
        comment_id: Uuid,
    ) -> ApiResult<CommentModel> {
        session
            .community
            .comment_repository
            .load_batch(&[comment_id])
            .await?
            .into_iter()
            .next()
            .flatten()
            .ok_or_else(|| ApiError::NotFound(format!("comment {comment_id}")))
    }

    /// Load user, profile and stats for every distinct author in one pass
    async fn load_authors(
        session: &RepositorySession,
        author_ids: impl Iterator<Item = Uuid>,
    ) -> ApiResult<HashMap<Uuid, CommentAuthor>> {
        let distinct: Vec<Uuid> = author_ids
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        let users = session
            .identity
            .app_user_repository
            .load_batch(&distinct)
            .await?;
        let profiles = session
            .identity
            .user_profile_repository
            .load_batch(&distinct)
            .await?;

        let mut authors = HashMap::with_capacity(distinct.len());
        for ((id, user), profile) in distinct.iter().zip(users).zip(profiles) {
            let user: AppUserModel = user.ok_or_else(|| {
                ApiError::InternalError(format!("comment author {id} has no user row"))
            })?;
            let profile: UserProfileModel = profile.ok_or_else(|| {
                ApiError::InternalError(format!("comment author {id} has no profile"))
            })?;
            let stats = session
                .community
                .comment_repository
                .author_stats(*id)
                .await?;
            authors.insert(
                *id,
                CommentAuthor {
                    user_id: user.id,
                    username: user.username.as_str().to_string(),
                    profile_photo_url: profile
                        .profile_photo_url
                        .as_ref()
                        .map(|url| url.as_str().to_string()),
                    tier: profile.tier(),
                    stats,
                },
            );
        }
        Ok(authors)
    }

    async fn view_for_new_comment(
        session: &RepositorySession,
        comment: CommentModel,
    ) -> ApiResult<CommentView> {
        let authors = Self::load_authors(session, std::iter::once(comment.user_id)).await?;
        Self::build_view(comment, 0, &authors, &HashSet::new())
    }

    fn build_view(
        comment: CommentModel,
        like_count: i64,
        authors: &HashMap<Uuid, CommentAuthor>,
        liked_ids: &HashSet<Uuid>,
    ) -> ApiResult<CommentView> {
        let author = authors.get(&comment.user_id).cloned().ok_or_else(|| {
            ApiError::InternalError(format!("no author loaded for comment {}", comment.id))
        })?;
        Ok(CommentView {
            id: comment.id,
            object_id: comment.object_id,
            viewer_liked: liked_ids.contains(&comment.id),
            author,
            body: comment.body,
            created_at: comment.created_at,
            like_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::catalog::heritage_object_repository::test_utils::test_utils::create_test_object;
    use crate::test_helper::{seed_actor, setup_test_context};

    fn comment(body: &str) -> NewComment {
        NewComment {
            body: body.to_string(),
        }
    }

    #[tokio::test]
    async fn like_toggles_alternate_at_the_service_level(
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let session = ctx.session();
        let actor = seed_actor(session, "social-liker", false, false, 1).await?;

        let object = create_test_object("Toggled object");
        session
            .catalog
            .heritage_object_repository
            .create_batch(vec![object.clone()])
            .await?;

        let first = SocialService::toggle_object_like(session, &actor, object.id).await?;
        assert!(first.liked);
        assert_eq!(first.like_count, 1);

        let second = SocialService::toggle_object_like(session, &actor, object.id).await?;
        assert!(!second.liked);
        assert_eq!(second.like_count, 0);

        Ok(())
    }

    #[tokio::test]
    async fn comment_listing_orders_by_likes_then_recency(
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let session = ctx.session();
        let author = seed_actor(session, "thread-author", false, false, 1).await?;
        let fan_one = seed_actor(session, "thread-fan-one", false, false, 1).await?;
        let fan_two = seed_actor(session, "thread-fan-two", false, false, 1).await?;

        let object = create_test_object("Discussed object");
        session
            .catalog
            .heritage_object_repository
            .create_batch(vec![object.clone()])
            .await?;

        let oldest =
            SocialService::post_comment(session, &author, object.id, &comment("Oldest")).await?;
        let middle =
            SocialService::post_comment(session, &author, object.id, &comment("Middle")).await?;
        let newest =
            SocialService::post_comment(session, &author, object.id, &comment("Newest")).await?;

        // two likes on the oldest, one on the middle
        SocialService::toggle_comment_like(session, &fan_one, oldest.id).await?;
        SocialService::toggle_comment_like(session, &fan_two, oldest.id).await?;
        SocialService::toggle_comment_like(session, &fan_one, middle.id).await?;

        let threads = SocialService::list_comments(session, object.id, Some(&fan_one)).await?;
        let order: Vec<Uuid> = threads.iter().map(|t| t.comment.id).collect();
        assert_eq!(order, vec![oldest.id, middle.id, newest.id]);
        assert_eq!(threads[0].comment.like_count, 2);
        assert!(threads[0].comment.viewer_liked);
        assert!(!threads[2].comment.viewer_liked);

        Ok(())
    }

    #[tokio::test]
    async fn replies_stay_one_level_deep(
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let session = ctx.session();
        let author = seed_actor(session, "nesting-author", false, false, 1).await?;

        let object = create_test_object("Nested object");
        session
            .catalog
            .heritage_object_repository
            .create_batch(vec![object.clone()])
            .await?;

        let top =
            SocialService::post_comment(session, &author, object.id, &comment("Top level")).await?;
        let reply =
            SocialService::post_reply(session, &author, top.id, &comment("First reply")).await?;
        assert_eq!(reply.object_id, object.id);

        let err = SocialService::post_reply(session, &author, reply.id, &comment("Too deep"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::ValidationError(_)));

        let threads = SocialService::list_comments(session, object.id, None).await?;
        assert_eq!(threads.len(), 1);
        assert_eq!(threads[0].replies.len(), 1);
        assert_eq!(threads[0].replies[0].body, "First reply");

        Ok(())
    }

    #[tokio::test]
    async fn soft_deleted_comments_vanish_from_listings_but_keep_their_data(
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let session = ctx.session();
        let author = seed_actor(session, "vanishing-author", false, false, 1).await?;
        let fan = seed_actor(session, "vanishing-fan", false, false, 1).await?;

        let object = create_test_object("Vanishing object");
        session
            .catalog
            .heritage_object_repository
            .create_batch(vec![object.clone()])
            .await?;

        let top =
            SocialService::post_comment(session, &author, object.id, &comment("Doomed")).await?;
        SocialService::post_reply(session, &fan, top.id, &comment("Orphaned reply")).await?;
        SocialService::toggle_comment_like(session, &fan, top.id).await?;

        SocialService::delete_comment(session, &author, top.id).await?;

        let threads = SocialService::list_comments(session, object.id, None).await?;
        assert!(threads.is_empty());

        // replies and like count remain queryable
        let replies = session
            .community
            .comment_repository
            .find_replies_by_parent_ids(&[top.id])
            .await?;
        assert_eq!(replies.len(), 1);
        let like_count = session
            .community
            .comment_like_repository
            .count_by_comment_id(top.id)
            .await?;
        assert_eq!(like_count, 1);

        Ok(())
    }

    #[tokio::test]
    async fn deletion_is_author_or_staff_only(
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let session = ctx.session();
        let author = seed_actor(session, "protective-author", false, false, 1).await?;
        let stranger = seed_actor(session, "comment-stranger", false, false, 999).await?;
        let staff = seed_actor(session, "comment-staff", true, false, 1).await?;

        let object = create_test_object("Moderated object");
        session
            .catalog
            .heritage_object_repository
            .create_batch(vec![object.clone()])
            .await?;

        let first =
            SocialService::post_comment(session, &author, object.id, &comment("Keep me")).await?;
        let second =
            SocialService::post_comment(session, &author, object.id, &comment("Staff call")).await?;

        // even an expert tier does not grant removal rights
        let err = SocialService::delete_comment(session, &stranger, first.id)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized(_)));

        SocialService::delete_comment(session, &staff, second.id).await?;
        let threads = SocialService::list_comments(session, object.id, None).await?;
        assert_eq!(threads.len(), 1);
        assert_eq!(threads[0].comment.id, first.id);

        Ok(())
    }

    #[tokio::test]
    async fn blank_comment_bodies_are_refused(
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let session = ctx.session();
        let author = seed_actor(session, "blank-author", false, false, 1).await?;

        let object = create_test_object("Silent object");
        session
            .catalog
            .heritage_object_repository
            .create_batch(vec![object.clone()])
            .await?;

        let err = SocialService::post_comment(session, &author, object.id, &comment("   "))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::ValidationError(_)));

        Ok(())
    }

    #[tokio::test]
    async fn author_stats_are_computed_on_read(
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let session = ctx.session();
        let author = seed_actor(session, "stats-author", false, false, 1).await?;
        let fan = seed_actor(session, "stats-fan", false, false, 1).await?;

        let object = create_test_object("Statistical object");
        session
            .catalog
            .heritage_object_repository
            .create_batch(vec![object.clone()])
            .await?;

        let first =
            SocialService::post_comment(session, &author, object.id, &comment("One")).await?;
        SocialService::post_comment(session, &author, object.id, &comment("Two")).await?;
        SocialService::toggle_comment_like(session, &fan, first.id).await?;

        let stats = SocialService::author_stats(session, author.user_id).await?;
        assert_eq!(stats.total_comments, 2);
        assert_eq!(stats.total_likes_received, 1);

        Ok(())
    }
}
