use sqlx::PgPool;
use std::sync::Arc;

use crate::executor::Executor;
use crate::repository::catalog::{
    EditProposalRepositoryImpl, HeritageObjectRepositoryImpl, SubmissionRepositoryImpl,
};
use crate::repository::community::{
    CommentLikeRepositoryImpl, CommentRepositoryImpl, HeritageLikeRepositoryImpl,
};
use crate::repository::identity::{AppUserRepositoryImpl, UserProfileRepositoryImpl};

/// Factory for units of work against one connection pool
#[derive(Clone)]
pub struct PostgresRepositories {
    pool: Arc<PgPool>,
}

impl PostgresRepositories {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Open a session: one transaction shared by every repository
    pub async fn begin_session(
        &self,
    ) -> Result<RepositorySession, Box<dyn std::error::Error + Send + Sync>> {
        let tx = self.pool.begin().await?;
        Ok(RepositorySession::new(Executor::new(tx)))
    }
}

pub struct IdentityRepositories {
    pub app_user_repository: Arc<AppUserRepositoryImpl>,
    pub user_profile_repository: Arc<UserProfileRepositoryImpl>,
}

pub struct CatalogRepositories {
    pub heritage_object_repository: Arc<HeritageObjectRepositoryImpl>,
    pub submission_repository: Arc<SubmissionRepositoryImpl>,
    pub edit_proposal_repository: Arc<EditProposalRepositoryImpl>,
}

pub struct CommunityRepositories {
    pub comment_repository: Arc<CommentRepositoryImpl>,
    pub heritage_like_repository: Arc<HeritageLikeRepositoryImpl>,
    pub comment_like_repository: Arc<CommentLikeRepositoryImpl>,
}

/// All repositories over one shared transaction
///
/// The session is the request-scoped transaction boundary of the system:
/// services read and write through it, and the caller decides between
/// `commit` and dropping the session, which rolls everything back.
pub struct RepositorySession {
    executor: Executor,
    pub identity: IdentityRepositories,
    pub catalog: CatalogRepositories,
    pub community: CommunityRepositories,
}

impl RepositorySession {
    pub fn new(executor: Executor) -> Self {
        let identity = IdentityRepositories {
            app_user_repository: Arc::new(AppUserRepositoryImpl::new(executor.clone())),
            user_profile_repository: Arc::new(UserProfileRepositoryImpl::new(executor.clone())),
        };
        let catalog = CatalogRepositories {
            heritage_object_repository: Arc::new(HeritageObjectRepositoryImpl::new(
                executor.clone(),
            )),
            submission_repository: Arc::new(SubmissionRepositoryImpl::new(executor.clone())),
            edit_proposal_repository: Arc::new(EditProposalRepositoryImpl::new(executor.clone())),
        };
        let community = CommunityRepositories {
            comment_repository: Arc::new(CommentRepositoryImpl::new(executor.clone())),
            heritage_like_repository: Arc::new(HeritageLikeRepositoryImpl::new(executor.clone())),
            comment_like_repository: Arc::new(CommentLikeRepositoryImpl::new(executor.clone())),
        };

        Self {
            executor,
            identity,
            catalog,
            community,
        }
    }

    /// Commit the unit of work
    pub async fn commit(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.executor.commit().await
    }
}
