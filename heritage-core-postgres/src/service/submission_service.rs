//! Submission workflow: the moderation gate for new catalog entries.
//!
//! Every submission passes through the auto-approval policy exactly once.
//! Privileged actors publish immediately; everyone else lands in the pending
//! queue until a reviewer acts.

use chrono::Utc;
use heritage_core_api::domain::catalog::ReviewStatus;
use heritage_core_api::domain::identity::ActorIdentity;
use heritage_core_api::domain::submission::{
    BatchReviewOutcome, NewSubmission, ReviewDecision, SubmissionOutcome,
};
use heritage_core_api::error::{ApiError, ApiResult};
use heritage_core_api::service::moderation_policy::{auto_approve, ensure_reviewer};
use heritage_core_db::models::catalog::submission::SubmissionModel;
use heritage_core_db::repository::create_batch::CreateBatch;
use heritage_core_db::repository::load_batch::LoadBatch;
use heritage_core_db::repository::pagination::{Page, PageRequest};
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::postgres_repositories::RepositorySession;

pub struct SubmissionService;

impl SubmissionService {
    /// Submit a candidate object, consulting the moderation policy
    pub async fn submit(
        session: &RepositorySession,
        actor: &ActorIdentity,
        input: &NewSubmission,
    ) -> ApiResult<SubmissionOutcome> {
        input
            .validate()
            .map_err(|e| ApiError::ValidationError(e.to_string()))?;

        let now = Utc::now();
        let mut submission =
            SubmissionModel::from_new(Uuid::new_v4(), actor.user_id, input, now)?;
        let submission_id = submission.id;

        if !auto_approve(actor) {
            session
                .catalog
                .submission_repository
                .create_batch(vec![submission])
                .await?;
            info!(%submission_id, user = %actor.username, "submission queued for review");
            return Ok(SubmissionOutcome::Queued { submission_id });
        }

        submission.status = ReviewStatus::Approved;
        let object = submission.to_heritage_object(Uuid::new_v4())?;
        let object_id = object.id;
        submission.converted_object_id = Some(object_id);

        session
            .catalog
            .submission_repository
            .create_batch(vec![submission])
            .await?;
        session
            .catalog
            .heritage_object_repository
            .create_batch(vec![object])
            .await?;

        info!(%submission_id, %object_id, user = %actor.username, "submission auto-approved and published");
        Ok(SubmissionOutcome::Published { object_id })
    }

    /// Approve a pending submission and convert it into a catalog entry
    pub async fn approve(
        session: &RepositorySession,
        reviewer: &ActorIdentity,
        submission_id: Uuid,
    ) -> ApiResult<Uuid> {
        ensure_reviewer(reviewer)?;

        let submission = Self::load(session, submission_id).await?;
        if submission.status != ReviewStatus::Pending {
            return Err(ApiError::PreconditionViolation(format!(
                "submission {submission_id} is {} and cannot be approved",
                submission.status
            )));
        }

        let now = Utc::now();
        let transitioned = session
            .catalog
            .submission_repository
            .update_status(submission_id, ReviewStatus::Approved, now)
            .await?;
        if !transitioned {
            return Err(ApiError::PreconditionViolation(format!(
                "submission {submission_id} is no longer pending"
            )));
        }

        let mut approved = submission;
        approved.status = ReviewStatus::Approved;
        let object = approved.to_heritage_object(Uuid::new_v4())?;

        // The conversion marker is the single-shot guard: losing this race
        // means another reviewer already produced the catalog entry.
        let claimed = session
            .catalog
            .submission_repository
            .mark_converted(submission_id, object.id, now)
            .await?;
        if !claimed {
            warn!(%submission_id, "conversion refused, submission already converted");
            return Err(ApiError::PreconditionViolation(format!(
                "submission {submission_id} was already converted"
            )));
        }

        let object_id = object.id;
        session
            .catalog
            .heritage_object_repository
            .create_batch(vec![object])
            .await?;

        info!(%submission_id, %object_id, reviewer = %reviewer.username, "submission approved");
        Ok(object_id)
    }

    /// Reject a pending submission; terminal, no resubmission path
    pub async fn reject(
        session: &RepositorySession,
        reviewer: &ActorIdentity,
        submission_id: Uuid,
    ) -> ApiResult<()> {
        ensure_reviewer(reviewer)?;

        let submission = Self::load(session, submission_id).await?;
        if submission.status != ReviewStatus::Pending {
            return Err(ApiError::PreconditionViolation(format!(
                "submission {submission_id} is {} and cannot be rejected",
                submission.status
            )));
        }

        let transitioned = session
            .catalog
            .submission_repository
            .update_status(submission_id, ReviewStatus::Rejected, Utc::now())
            .await?;
        if !transitioned {
            return Err(ApiError::PreconditionViolation(format!(
                "submission {submission_id} is no longer pending"
            )));
        }

        info!(%submission_id, reviewer = %reviewer.username, "submission rejected");
        Ok(())
    }

    /// Bulk review action over pending submissions
    ///
    /// Records failing their precondition are skipped with a reason instead
    /// of aborting the whole batch.
    pub async fn review_batch(
        session: &RepositorySession,
        reviewer: &ActorIdentity,
        submission_ids: &[Uuid],
        decision: ReviewDecision,
    ) -> ApiResult<BatchReviewOutcome> {
        ensure_reviewer(reviewer)?;

        let mut outcome = BatchReviewOutcome::default();
        for &id in submission_ids {
            let result = match decision {
                ReviewDecision::Approve => Self::approve(session, reviewer, id).await.map(|_| ()),
                ReviewDecision::Reject => Self::reject(session, reviewer, id).await,
            };
            match result {
                Ok(()) => outcome.reviewed.push(id),
                Err(ApiError::PreconditionViolation(reason))
                | Err(ApiError::NotFound(reason)) => outcome.skipped.push((id, reason)),
                Err(other) => return Err(other),
            }
        }
        Ok(outcome)
    }

    /// The acting user's own submissions, newest first
    pub async fn list_mine(
        session: &RepositorySession,
        actor: &ActorIdentity,
        page: PageRequest,
    ) -> ApiResult<Page<SubmissionModel>> {
        Ok(session
            .catalog
            .submission_repository
            .find_by_user_id(actor.user_id, page)
            .await?)
    }

    async fn load(
        session: &RepositorySession,
        submission_id: Uuid,
    ) -> ApiResult<SubmissionModel> {
        session
            .catalog
            .submission_repository
            .load_batch(&[submission_id])
            .await?
            .into_iter()
            .next()
            .flatten()
            .ok_or_else(|| ApiError::NotFound(format!("submission {submission_id}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helper::{seed_actor, setup_test_context};
    use chrono::NaiveDate;
    use heritage_core_api::domain::catalog::{IchDomain, ObjectType, Region};
    use heritage_core_db::repository::load::Load;

    fn new_submission(title: &str) -> NewSubmission {
        NewSubmission {
            title: title.to_string(),
            title_ar: None,
            title_fr: None,
            description: format!("Description of {title}"),
            description_ar: None,
            description_fr: None,
            region: Region::Asir,
            object_type: ObjectType::Jewellery,
            ich_domain: IchDomain::TraditionalCraftsmanship,
            origin_date: NaiveDate::from_ymd_opt(1900, 3, 15).unwrap(),
            image: Some("submissions/images/piece.jpg".to_string()),
            model_3d: None,
            alternate_name: None,
            maker: None,
            attribution: None,
            period: None,
            origin_place: None,
            materials: Some("Silver".to_string()),
            dimensions: None,
            weight: None,
        }
    }

    #[tokio::test]
    async fn privileged_actors_publish_immediately(
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let session = ctx.session();
        let expert = seed_actor(session, "expert-submitter", false, false, 999).await?;

        let outcome =
            SubmissionService::submit(session, &expert, &new_submission("Silver amulet")).await?;

        let SubmissionOutcome::Published { object_id } = outcome else {
            panic!("expected immediate publication, got {outcome:?}");
        };

        let object = session
            .catalog
            .heritage_object_repository
            .load(object_id)
            .await?;
        assert_eq!(object.title.as_str(), "Silver amulet");
        // media key moved onto the catalog entry
        assert_eq!(
            object.image.as_ref().unwrap().as_str(),
            "submissions/images/piece.jpg"
        );

        let page = SubmissionService::list_mine(
            session,
            &expert,
            heritage_core_db::repository::pagination::PageRequest::default(),
        )
        .await?;
        assert_eq!(page.items[0].status, ReviewStatus::Approved);
        assert_eq!(page.items[0].converted_object_id, Some(object_id));

        Ok(())
    }

    #[tokio::test]
    async fn plain_members_are_queued_without_catalog_mutation(
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let session = ctx.session();
        let member = seed_actor(session, "member-submitter", false, false, 1).await?;

        let outcome =
            SubmissionService::submit(session, &member, &new_submission("Clay jar")).await?;

        let SubmissionOutcome::Queued { submission_id } = outcome else {
            panic!("expected a queued submission, got {outcome:?}");
        };

        let submission = session
            .catalog
            .submission_repository
            .load(submission_id)
            .await?;
        assert_eq!(submission.status, ReviewStatus::Pending);
        assert!(submission.converted_object_id.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn approval_converts_exactly_once(
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let session = ctx.session();
        let member = seed_actor(session, "queued-submitter", false, false, 1).await?;
        let moderator = seed_actor(session, "acting-moderator", false, false, 997).await?;

        let SubmissionOutcome::Queued { submission_id } =
            SubmissionService::submit(session, &member, &new_submission("Woven rug")).await?
        else {
            panic!("expected a queued submission");
        };

        let object_id = SubmissionService::approve(session, &moderator, submission_id).await?;
        assert!(session
            .catalog
            .heritage_object_repository
            .load(object_id)
            .await
            .is_ok());

        // a second approval must fail, not mint a second catalog entry
        let err = SubmissionService::approve(session, &moderator, submission_id)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::PreconditionViolation(_)));

        Ok(())
    }

    #[tokio::test]
    async fn members_cannot_review() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let session = ctx.session();
        let member = seed_actor(session, "plain-member", false, false, 1).await?;
        let other = seed_actor(session, "other-member", false, false, 5).await?;

        let SubmissionOutcome::Queued { submission_id } =
            SubmissionService::submit(session, &member, &new_submission("Pending piece")).await?
        else {
            panic!("expected a queued submission");
        };

        let err = SubmissionService::approve(session, &other, submission_id)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized(_)));

        Ok(())
    }

    #[tokio::test]
    async fn rejection_is_terminal() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let session = ctx.session();
        let member = seed_actor(session, "rejected-submitter", false, false, 1).await?;
        let staff = seed_actor(session, "acting-staff", true, false, 1).await?;

        let SubmissionOutcome::Queued { submission_id } =
            SubmissionService::submit(session, &member, &new_submission("Rejected piece")).await?
        else {
            panic!("expected a queued submission");
        };

        SubmissionService::reject(session, &staff, submission_id).await?;

        let err = SubmissionService::approve(session, &staff, submission_id)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::PreconditionViolation(_)));

        Ok(())
    }

    #[tokio::test]
    async fn bulk_review_skips_ineligible_records(
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let session = ctx.session();
        let member = seed_actor(session, "bulk-submitter", false, false, 1).await?;
        let staff = seed_actor(session, "bulk-reviewer", true, false, 1).await?;

        let SubmissionOutcome::Queued { submission_id: first } =
            SubmissionService::submit(session, &member, &new_submission("Bulk one")).await?
        else {
            panic!("expected a queued submission");
        };
        let SubmissionOutcome::Queued { submission_id: second } =
            SubmissionService::submit(session, &member, &new_submission("Bulk two")).await?
        else {
            panic!("expected a queued submission");
        };

        // second is already rejected before the batch runs
        SubmissionService::reject(session, &staff, second).await?;
        let missing = Uuid::new_v4();

        let outcome = SubmissionService::review_batch(
            session,
            &staff,
            &[first, second, missing],
            ReviewDecision::Approve,
        )
        .await?;

        assert_eq!(outcome.reviewed, vec![first]);
        assert_eq!(outcome.skipped.len(), 2);

        Ok(())
    }
}
