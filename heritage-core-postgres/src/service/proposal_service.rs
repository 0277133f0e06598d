//! Edit-proposal workflow: validated change-sets against published entries.
//!
//! Change-set keys are checked against the closed editable-field set when a
//! proposal is created AND again before it is applied, so nothing that was
//! persisted out-of-band can write arbitrary columns.

use chrono::Utc;
use heritage_core_api::domain::catalog::ReviewStatus;
use heritage_core_api::domain::identity::ActorIdentity;
use heritage_core_api::domain::patch::ObjectPatch;
use heritage_core_api::domain::proposal::{NewEditProposal, ProposalOutcome};
use heritage_core_api::domain::submission::{BatchReviewOutcome, ReviewDecision};
use heritage_core_api::error::{ApiError, ApiResult};
use heritage_core_api::service::moderation_policy::{auto_approve, ensure_reviewer};
use heritage_core_db::models::catalog::edit_proposal::EditProposalModel;
use heritage_core_db::models::catalog::heritage_object::HeritageObjectModel;
use heritage_core_db::repository::create_batch::CreateBatch;
use heritage_core_db::repository::load_batch::LoadBatch;
use heritage_core_db::repository::pagination::{Page, PageRequest};
use heritage_core_db::repository::update_batch::UpdateBatch;
use tracing::info;
use uuid::Uuid;

use crate::postgres_repositories::RepositorySession;

pub struct ProposalService;

impl ProposalService {
    /// Propose a partial change to a catalog entry
    pub async fn propose(
        session: &RepositorySession,
        actor: &ActorIdentity,
        input: &NewEditProposal,
    ) -> ApiResult<ProposalOutcome> {
        let object = Self::load_object(session, input.object_id).await?;
        let patch = ObjectPatch::from_json(&input.data)?;

        let now = Utc::now();
        let proposal_id = Uuid::new_v4();
        let note = input
            .note
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string);

        if !auto_approve(actor) {
            let proposal = EditProposalModel {
                id: proposal_id,
                user_id: actor.user_id,
                object_id: input.object_id,
                note,
                data: input.data.clone(),
                status: ReviewStatus::Pending,
                created_at: now,
                updated_at: now,
            };
            session
                .catalog
                .edit_proposal_repository
                .create_batch(vec![proposal])
                .await?;
            info!(%proposal_id, object_id = %input.object_id, user = %actor.username,
                "edit proposal queued for review");
            return Ok(ProposalOutcome::Queued { proposal_id });
        }

        // Apply directly and keep an approved proposal as the audit record
        let mut updated = object;
        updated.apply_patch(&patch)?;
        session
            .catalog
            .heritage_object_repository
            .update_batch(vec![updated])
            .await?;

        let proposal = EditProposalModel {
            id: proposal_id,
            user_id: actor.user_id,
            object_id: input.object_id,
            note: note.or_else(|| Some(format!("Auto-approved edit by {}", actor.username))),
            data: input.data.clone(),
            status: ReviewStatus::Approved,
            created_at: now,
            updated_at: now,
        };
        session
            .catalog
            .edit_proposal_repository
            .create_batch(vec![proposal])
            .await?;

        info!(%proposal_id, object_id = %input.object_id, user = %actor.username,
            fields = patch.len(), "edit proposal auto-approved and applied");
        Ok(ProposalOutcome::Applied { proposal_id })
    }

    /// Approve a pending proposal, applying its change-set atomically
    pub async fn approve(
        session: &RepositorySession,
        reviewer: &ActorIdentity,
        proposal_id: Uuid,
    ) -> ApiResult<()> {
        ensure_reviewer(reviewer)?;

        let proposal = Self::load_proposal(session, proposal_id).await?;
        if proposal.status != ReviewStatus::Pending {
            return Err(ApiError::PreconditionViolation(format!(
                "edit proposal {proposal_id} is {} and cannot be approved",
                proposal.status
            )));
        }

        // Re-validate the stored change-set before it touches the object
        let patch = proposal.patch()?;
        let object = Self::load_object(session, proposal.object_id).await?;

        let now = Utc::now();
        let transitioned = session
            .catalog
            .edit_proposal_repository
            .update_status(proposal_id, ReviewStatus::Approved, now)
            .await?;
        if !transitioned {
            return Err(ApiError::PreconditionViolation(format!(
                "edit proposal {proposal_id} is no longer pending"
            )));
        }

        let mut updated = object;
        updated.apply_patch(&patch)?;
        session
            .catalog
            .heritage_object_repository
            .update_batch(vec![updated])
            .await?;

        info!(%proposal_id, reviewer = %reviewer.username, fields = patch.len(),
            "edit proposal approved and applied");
        Ok(())
    }

    /// Reject a pending proposal; terminal, no resubmission path
    pub async fn reject(
        session: &RepositorySession,
        reviewer: &ActorIdentity,
        proposal_id: Uuid,
    ) -> ApiResult<()> {
        ensure_reviewer(reviewer)?;

        let proposal = Self::load_proposal(session, proposal_id).await?;
        if proposal.status != ReviewStatus::Pending {
            return Err(ApiError::PreconditionViolation(format!(
                "edit proposal {proposal_id} is {} and cannot be rejected",
                proposal.status
            )));
        }

        let transitioned = session
            .catalog
            .edit_proposal_repository
            .update_status(proposal_id, ReviewStatus::Rejected, Utc::now())
            .await?;
        if !transitioned {
            return Err(ApiError::PreconditionViolation(format!(
                "edit proposal {proposal_id} is no longer pending"
            )));
        }

        info!(%proposal_id, reviewer = %reviewer.username, "edit proposal rejected");
        Ok(())
    }

    /// Bulk review action over pending proposals
    pub async fn review_batch(
        session: &RepositorySession,
        reviewer: &ActorIdentity,
        proposal_ids: &[Uuid],
        decision: ReviewDecision,
    ) -> ApiResult<BatchReviewOutcome> {
        ensure_reviewer(reviewer)?;

        let mut outcome = BatchReviewOutcome::default();
        for &id in proposal_ids {
            let result = match decision {
                ReviewDecision::Approve => Self::approve(session, reviewer, id).await,
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

    /// The acting user's own proposals, newest first
    pub async fn list_mine(
        session: &RepositorySession,
        actor: &ActorIdentity,
        page: PageRequest,
    ) -> ApiResult<Page<EditProposalModel>> {
        Ok(session
            .catalog
            .edit_proposal_repository
            .find_by_user_id(actor.user_id, page)
            .await?)
    }

    /// Proposals targeting one catalog entry, newest first
    pub async fn list_for_object(
        session: &RepositorySession,
        object_id: Uuid,
        page: PageRequest,
    ) -> ApiResult<Page<EditProposalModel>> {
        Ok(session
            .catalog
            .edit_proposal_repository
            .find_by_object_id(object_id, page)
            .await?)
    }

    async fn load_proposal(
        session: &RepositorySession,
        proposal_id: Uuid,
    ) -> ApiResult<EditProposalModel> {
        session
            .catalog
            .edit_proposal_repository
            .load_batch(&[proposal_id])
            .await?
            .into_iter()
            .next()
            .flatten()
            .ok_or_else(|| ApiError::NotFound(format!("edit proposal {proposal_id}")))
    }

    async fn load_object(
        session: &RepositorySession,
        object_id: Uuid,
    ) -> ApiResult<HeritageObjectModel> {
        session
            .catalog
            .heritage_object_repository
            .load_batch(&[object_id])
            .await?
            .into_iter()
            .next()
            .flatten()
            .ok_or_else(|| ApiError::NotFound(format!("heritage object {object_id}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::catalog::heritage_object_repository::test_utils::test_utils::create_test_object;
    use crate::test_helper::{seed_actor, setup_test_context};
    use heritage_core_api::domain::catalog::Region;
    use heritage_core_db::repository::load::Load;
    use serde_json::json;

    #[tokio::test]
    async fn privileged_edits_apply_immediately_with_audit_record(
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let session = ctx.session();
        let consultant = seed_actor(session, "edit-consultant", false, false, 998).await?;

        let object = create_test_object("Misattributed bowl");
        session
            .catalog
            .heritage_object_repository
            .create_batch(vec![object.clone()])
            .await?;

        let outcome = ProposalService::propose(
            session,
            &consultant,
            &NewEditProposal {
                object_id: object.id,
                data: json!({"maker": "Hail silversmith", "region": "Hail"}),
                note: None,
            },
        )
        .await?;

        let ProposalOutcome::Applied { proposal_id } = outcome else {
            panic!("expected an applied proposal, got {outcome:?}");
        };

        let updated = session
            .catalog
            .heritage_object_repository
            .load(object.id)
            .await?;
        assert_eq!(updated.maker.as_ref().unwrap().as_str(), "Hail silversmith");
        assert_eq!(updated.region, Region::Hail);
        // untouched fields survive
        assert_eq!(updated.title, object.title);
        assert_eq!(updated.description, object.description);

        let audit = session
            .catalog
            .edit_proposal_repository
            .load(proposal_id)
            .await?;
        assert_eq!(audit.status, ReviewStatus::Approved);
        assert!(audit.note.unwrap().contains("edit-consultant"));

        Ok(())
    }

    #[tokio::test]
    async fn member_proposals_queue_without_touching_the_target(
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let session = ctx.session();
        let member = seed_actor(session, "edit-member", false, false, 1).await?;

        let object = create_test_object("Untouched object");
        session
            .catalog
            .heritage_object_repository
            .create_batch(vec![object.clone()])
            .await?;

        let outcome = ProposalService::propose(
            session,
            &member,
            &NewEditProposal {
                object_id: object.id,
                data: json!({"maker": "Hopeful attribution"}),
                note: Some("Please review".to_string()),
            },
        )
        .await?;
        assert!(matches!(outcome, ProposalOutcome::Queued { .. }));

        let unchanged = session
            .catalog
            .heritage_object_repository
            .load(object.id)
            .await?;
        assert!(unchanged.maker.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn unknown_fields_are_rejected_before_anything_persists(
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let session = ctx.session();
        let member = seed_actor(session, "edit-prober", false, false, 1).await?;

        let object = create_test_object("Probe target");
        session
            .catalog
            .heritage_object_repository
            .create_batch(vec![object.clone()])
            .await?;

        let err = ProposalService::propose(
            session,
            &member,
            &NewEditProposal {
                object_id: object.id,
                data: json!({"guid": "https://attacker.example/x", "maker": "ok"}),
                note: None,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::FieldErrors(_)));

        let page = ProposalService::list_mine(session, &member, PageRequest::default()).await?;
        assert_eq!(page.total, 0);

        Ok(())
    }

    #[tokio::test]
    async fn approval_applies_the_stored_change_set(
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let session = ctx.session();
        let member = seed_actor(session, "edit-author", false, false, 1).await?;
        let moderator = seed_actor(session, "edit-reviewer", false, false, 997).await?;

        let object = create_test_object("Reviewed object");
        session
            .catalog
            .heritage_object_repository
            .create_batch(vec![object.clone()])
            .await?;

        let ProposalOutcome::Queued { proposal_id } = ProposalService::propose(
            session,
            &member,
            &NewEditProposal {
                object_id: object.id,
                data: json!({"dimensions": "12 x 40 cm", "origin_date": "1885-01-01"}),
                note: None,
            },
        )
        .await?
        else {
            panic!("expected a queued proposal");
        };

        ProposalService::approve(session, &moderator, proposal_id).await?;

        let updated = session
            .catalog
            .heritage_object_repository
            .load(object.id)
            .await?;
        assert_eq!(updated.dimensions.as_ref().unwrap().as_str(), "12 x 40 cm");
        assert_eq!(
            updated.origin_date,
            chrono::NaiveDate::from_ymd_opt(1885, 1, 1).unwrap()
        );

        // terminal: cannot be approved twice
        let err = ProposalService::approve(session, &moderator, proposal_id)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::PreconditionViolation(_)));

        Ok(())
    }

    #[tokio::test]
    async fn empty_change_sets_are_refused(
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let session = ctx.session();
        let member = seed_actor(session, "empty-proposer", false, false, 1).await?;

        let object = create_test_object("No-change target");
        session
            .catalog
            .heritage_object_repository
            .create_batch(vec![object.clone()])
            .await?;

        let err = ProposalService::propose(
            session,
            &member,
            &NewEditProposal {
                object_id: object.id,
                data: json!({}),
                note: None,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::ValidationError(_)));

        Ok(())
    }

    #[tokio::test]
    async fn proposals_against_missing_objects_are_not_found(
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let session = ctx.session();
        let member = seed_actor(session, "lost-proposer", false, false, 1).await?;

        let err = ProposalService::propose(
            session,
            &member,
            &NewEditProposal {
                object_id: Uuid::new_v4(),
                data: json!({"maker": "Nobody"}),
                note: None,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));

        Ok(())
    }
}
