//! Identity registration, OAuth photo sync and profile dashboards.
//!
//! User creation is the single place the one-profile-per-user invariant is
//! enforced: the user row, its hashed-username index and its profile are
//! written in the same unit of work.

use chrono::Utc;
use heapless::String as HeaplessString;
use heritage_core_api::domain::identity::ActorIdentity;
use heritage_core_api::domain::profile::{
    badges_for, CommentSummary, Dashboard, DashboardStats, LikedObject, NewUser, ProfileView,
    ProposalSummary, PublicProfile, SubmissionSummary,
};
use heritage_core_api::error::{ApiError, ApiResult};
use heritage_core_db::models::catalog::edit_proposal::EditProposalModel;
use heritage_core_db::models::identity::app_user::AppUserModel;
use heritage_core_db::models::identity::user_profile::UserProfileModel;
use heritage_core_db::repository::create_batch::CreateBatch;
use heritage_core_db::repository::load_batch::LoadBatch;
use heritage_core_db::repository::pagination::PageRequest;
use heritage_core_db::utils::hash_as_i64;
use std::collections::HashMap;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::postgres_repositories::RepositorySession;

const RECENT_SUBMISSIONS: usize = 3;
const RECENT_PROPOSALS: usize = 3;
const RECENT_LIKES: i64 = 5;
const RECENT_COMMENTS: i64 = 3;

pub struct ProfileService;

impl ProfileService {
    /// Register the account handed over by the authentication provider
    ///
    /// Creates the user row and exactly one profile transactionally; a taken
    /// username is a validation failure.
    pub async fn register_user(
        session: &RepositorySession,
        input: &NewUser,
    ) -> ApiResult<(AppUserModel, UserProfileModel)> {
        input
            .validate()
            .map_err(|e| ApiError::ValidationError(e.to_string()))?;

        if Self::find_user_by_username(session, &input.username)
            .await?
            .is_some()
        {
            return Err(ApiError::ValidationError(format!(
                "username '{}' is already taken",
                input.username
            )));
        }

        let now = Utc::now();
        let user = AppUserModel {
            id: Uuid::new_v4(),
            username: HeaplessString::try_from(input.username.as_str())
                .map_err(|_| ApiError::ValidationError("username is too long".to_string()))?,
            email: input
                .email
                .as_deref()
                .map(HeaplessString::try_from)
                .transpose()
                .map_err(|_| ApiError::ValidationError("email is too long".to_string()))?,
            is_staff: input.is_staff,
            is_superuser: input.is_superuser,
            date_joined: now,
        };
        let profile = UserProfileModel::new_for_user(user.id, now);

        session
            .identity
            .app_user_repository
            .create_batch(vec![user.clone()])
            .await?;
        session
            .identity
            .user_profile_repository
            .create_batch(vec![profile.clone()])
            .await?;

        info!(user_id = %user.id, username = %input.username, "user registered with profile");
        Ok((user, profile))
    }

    /// Store the photo URL delivered by the OAuth provider
    ///
    /// Overwrites only when the incoming URL is non-empty and differs from
    /// the stored one. Returns whether anything was written.
    pub async fn sync_profile_photo(
        session: &RepositorySession,
        user_id: Uuid,
        photo_url: &str,
    ) -> ApiResult<bool> {
        let profile = Self::load_profile(session, user_id).await?;
        if !profile.photo_needs_update(photo_url) {
            return Ok(false);
        }

        session
            .identity
            .user_profile_repository
            .update_photo_url(user_id, Some(photo_url))
            .await?;

        info!(%user_id, "profile photo synced from login");
        Ok(true)
    }

    /// The signed-in user's dashboard
    pub async fn me_dashboard(
        session: &RepositorySession,
        actor: &ActorIdentity,
    ) -> ApiResult<Dashboard> {
        let user = Self::load_user(session, actor.user_id).await?;
        let profile = Self::load_profile(session, actor.user_id).await?;

        let likes = session
            .community
            .heritage_like_repository
            .count_by_user_id(actor.user_id)
            .await?;
        let comment_stats = session
            .community
            .comment_repository
            .author_stats(actor.user_id)
            .await?;

        let submissions = session
            .catalog
            .submission_repository
            .find_by_user_id(actor.user_id, PageRequest::new(RECENT_SUBMISSIONS, 0))
            .await?;
        let proposals = session
            .catalog
            .edit_proposal_repository
            .find_by_user_id(actor.user_id, PageRequest::new(RECENT_PROPOSALS, 0))
            .await?;

        let recent_submissions = submissions
            .items
            .iter()
            .map(|s| SubmissionSummary {
                id: s.id,
                title: s.title.as_str().to_string(),
                status: s.status,
                created_at: s.created_at,
            })
            .collect();
        let recent_proposals =
            Self::proposal_summaries(session, &proposals.items).await?;

        let stats = DashboardStats {
            likes,
            comments: comment_stats.total_comments,
            proposals: proposals.total as i64,
            submissions: submissions.total as i64,
        };
        let activity_count = stats.submissions + stats.comments;

        Ok(Dashboard {
            profile: Self::profile_view(&user, &profile, activity_count),
            stats,
            recent_submissions,
            recent_proposals,
        })
    }

    /// Another user's public profile, looked up by handle
    pub async fn public_profile(
        session: &RepositorySession,
        username: &str,
    ) -> ApiResult<PublicProfile> {
        let user = Self::find_user_by_username(session, username)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("user '{username}'")))?;
        let profile = Self::load_profile(session, user.id).await?;

        let likes_count = session
            .community
            .heritage_like_repository
            .count_by_user_id(user.id)
            .await?;
        let comment_stats = session
            .community
            .comment_repository
            .author_stats(user.id)
            .await?;
        let submissions = session
            .catalog
            .submission_repository
            .find_by_user_id(user.id, PageRequest::new(1, 0))
            .await?;

        let recent_likes = Self::recent_likes(session, user.id).await?;
        let recent_comments = Self::recent_comments(session, user.id).await?;

        let activity_count = submissions.total as i64 + comment_stats.total_comments;

        Ok(PublicProfile {
            profile: Self::profile_view(&user, &profile, activity_count),
            likes_count,
            comments_count: comment_stats.total_comments,
            recent_likes,
            recent_comments,
        })
    }

    fn profile_view(
        user: &AppUserModel,
        profile: &UserProfileModel,
        activity_count: i64,
    ) -> ProfileView {
        ProfileView {
            user_id: user.id,
            username: user.username.as_str().to_string(),
            bio: profile.bio.clone(),
            profile_photo_url: profile
                .profile_photo_url
                .as_ref()
                .map(|url| url.as_str().to_string()),
            tier: profile.tier(),
            badges: badges_for(
                user.is_staff,
                user.is_superuser,
                profile.tier(),
                activity_count,
            ),
            activity_count,
        }
    }

    async fn recent_likes(
        session: &RepositorySession,
        user_id: Uuid,
    ) -> ApiResult<Vec<LikedObject>> {
        let likes = session
            .community
            .heritage_like_repository
            .find_recent_by_user_id(user_id, RECENT_LIKES)
            .await?;
        let titles =
            Self::object_titles(session, likes.iter().map(|like| like.object_id)).await?;

        Ok(likes
            .into_iter()
            .filter_map(|like| {
                titles.get(&like.object_id).map(|title| LikedObject {
                    object_id: like.object_id,
                    title: title.clone(),
                    liked_at: like.created_at,
                })
            })
            .collect())
    }

    async fn recent_comments(
        session: &RepositorySession,
        user_id: Uuid,
    ) -> ApiResult<Vec<CommentSummary>> {
        let comments = session
            .community
            .comment_repository
            .find_recent_by_user_id(user_id, RECENT_COMMENTS)
            .await?;
        let titles =
            Self::object_titles(session, comments.iter().map(|c| c.object_id)).await?;

        Ok(comments
            .into_iter()
            .filter_map(|c| {
                titles.get(&c.object_id).map(|title| CommentSummary {
                    id: c.id,
                    object_id: c.object_id,
                    object_title: title.clone(),
                    body: c.body,
                    created_at: c.created_at,
                })
            })
            .collect())
    }

    async fn proposal_summaries(
        session: &RepositorySession,
        proposals: &[EditProposalModel],
    ) -> ApiResult<Vec<ProposalSummary>> {
        let titles =
            Self::object_titles(session, proposals.iter().map(|p| p.object_id)).await?;

        Ok(proposals
            .iter()
            .filter_map(|p| {
                titles.get(&p.object_id).map(|title| ProposalSummary {
                    id: p.id,
                    object_id: p.object_id,
                    object_title: title.clone(),
                    status: p.status,
                    created_at: p.created_at,
                })
            })
            .collect())
    }

    async fn object_titles(
        session: &RepositorySession,
        object_ids: impl Iterator<Item = Uuid>,
    ) -> ApiResult<HashMap<Uuid, String>> {
        let distinct: Vec<Uuid> = object_ids
            .collect::<std::collections::HashSet<_>>()
            .into_iter()
            .collect();
        let objects = session
            .catalog
            .heritage_object_repository
            .load_batch(&distinct)
            .await?;

        Ok(objects
            .into_iter()
            .flatten()
            .map(|object| (object.id, object.title.as_str().to_string()))
            .collect())
    }

    async fn find_user_by_username(
        session: &RepositorySession,
        username: &str,
    ) -> ApiResult<Option<AppUserModel>> {
        let candidates = session
            .identity
            .app_user_repository
            .find_by_username_hash(hash_as_i64(&username))
            .await?;
        if candidates.is_empty() {
            return Ok(None);
        }

        let ids: Vec<Uuid> = candidates.iter().map(|idx| idx.id).collect();
        let users = session
            .identity
            .app_user_repository
            .load_batch(&ids)
            .await?;

        // Hash collisions are possible; the username itself decides.
        Ok(users
            .into_iter()
            .flatten()
            .find(|user| user.username.as_str() == username))
    }

    async fn load_user(session: &RepositorySession, user_id: Uuid) -> ApiResult<AppUserModel> {
        session
            .identity
            .app_user_repository
            .load_batch(&[user_id])
            .await?
            .into_iter()
            .next()
            .flatten()
            .ok_or_else(|| ApiError::NotFound(format!("user {user_id}")))
    }

    async fn load_profile(
        session: &RepositorySession,
        user_id: Uuid,
    ) -> ApiResult<UserProfileModel> {
        session
            .identity
            .user_profile_repository
            .load_batch(&[user_id])
            .await?
            .into_iter()
            .next()
            .flatten()
            .ok_or_else(|| ApiError::NotFound(format!("profile for user {user_id}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::catalog::heritage_object_repository::test_utils::test_utils::create_test_object;
    use crate::service::social_service::SocialService;
    use crate::service::submission_service::SubmissionService;
    use crate::test_helper::{seed_actor, setup_test_context};
    use chrono::NaiveDate;
    use heritage_core_api::domain::catalog::{IchDomain, ObjectType, Region, ReviewStatus};
    use heritage_core_api::domain::profile::Badge;
    use heritage_core_api::domain::social::NewComment;
    use heritage_core_api::domain::submission::NewSubmission;

    fn new_user(username: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            email: None,
            is_staff: false,
            is_superuser: false,
        }
    }

    fn new_submission(title: &str) -> NewSubmission {
        NewSubmission {
            title: title.to_string(),
            title_ar: None,
            title_fr: None,
            description: "A dashboard fixture.".to_string(),
            description_ar: None,
            description_fr: None,
            region: Region::Tabuk,
            object_type: ObjectType::Textile,
            ich_domain: IchDomain::TraditionalCraftsmanship,
            origin_date: NaiveDate::from_ymd_opt(1950, 1, 1).unwrap(),
            image: None,
            model_3d: None,
            alternate_name: None,
            maker: None,
            attribution: None,
            period: None,
            origin_place: None,
            materials: None,
            dimensions: None,
            weight: None,
        }
    }

    #[tokio::test]
    async fn registration_creates_exactly_one_profile(
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let session = ctx.session();

        let (user, profile) =
            ProfileService::register_user(session, &new_user("fresh-registrant")).await?;
        assert_eq!(profile.user_id, user.id);
        assert_eq!(profile.rank, 1);

        let loaded = ProfileService::load_profile(session, user.id).await?;
        assert_eq!(loaded.user_id, user.id);

        let err = ProfileService::register_user(session, &new_user("fresh-registrant"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::ValidationError(_)));

        Ok(())
    }

    #[tokio::test]
    async fn photo_sync_overwrites_only_on_change(
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let session = ctx.session();

        let (user, _) =
            ProfileService::register_user(session, &new_user("photo-registrant")).await?;

        assert!(
            ProfileService::sync_profile_photo(
                session,
                user.id,
                "https://lh3.example.com/a.jpg"
            )
            .await?
        );
        // same URL again is a no-op
        assert!(
            !ProfileService::sync_profile_photo(
                session,
                user.id,
                "https://lh3.example.com/a.jpg"
            )
            .await?
        );
        // empty URLs never overwrite
        assert!(!ProfileService::sync_profile_photo(session, user.id, "").await?);
        assert!(
            ProfileService::sync_profile_photo(
                session,
                user.id,
                "https://lh3.example.com/b.jpg"
            )
            .await?
        );

        Ok(())
    }

    #[tokio::test]
    async fn dashboard_counts_reflect_activity(
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let session = ctx.session();
        let actor = seed_actor(session, "dashboard-owner", false, false, 1).await?;

        let object = create_test_object("Dashboard object");
        session
            .catalog
            .heritage_object_repository
            .create_batch(vec![object.clone()])
            .await?;

        SubmissionService::submit(session, &actor, &new_submission("Dashboard submission"))
            .await?;
        SocialService::post_comment(
            session,
            &actor,
            object.id,
            &NewComment {
                body: "Dashboard comment".to_string(),
            },
        )
        .await?;
        SocialService::toggle_object_like(session, &actor, object.id).await?;

        let dashboard = ProfileService::me_dashboard(session, &actor).await?;
        assert_eq!(dashboard.stats.submissions, 1);
        assert_eq!(dashboard.stats.comments, 1);
        assert_eq!(dashboard.stats.likes, 1);
        assert_eq!(dashboard.stats.proposals, 0);
        assert_eq!(dashboard.recent_submissions.len(), 1);
        assert_eq!(dashboard.recent_submissions[0].status, ReviewStatus::Pending);
        assert_eq!(dashboard.profile.activity_count, 2);

        Ok(())
    }

    #[tokio::test]
    async fn public_profiles_resolve_by_username(
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let session = ctx.session();
        let actor = seed_actor(session, "public-face", false, false, 999).await?;

        let object = create_test_object("Public object");
        session
            .catalog
            .heritage_object_repository
            .create_batch(vec![object.clone()])
            .await?;
        SocialService::toggle_object_like(session, &actor, object.id).await?;

        let profile = ProfileService::public_profile(session, "public-face").await?;
        assert_eq!(profile.profile.username, "public-face");
        assert!(profile.profile.badges.contains(&Badge::Expert));
        assert_eq!(profile.likes_count, 1);
        assert_eq!(profile.recent_likes.len(), 1);
        assert_eq!(profile.recent_likes[0].title, "Public object");

        let err = ProfileService::public_profile(session, "nobody-known")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));

        Ok(())
    }
}
