//! Read-side browsing of the published catalog.

use heritage_core_api::domain::catalog::CatalogFilter;
use heritage_core_api::domain::identity::ActorIdentity;
use heritage_core_api::error::{ApiError, ApiResult};
use heritage_core_db::models::catalog::heritage_object::HeritageObjectModel;
use heritage_core_db::repository::load_batch::LoadBatch;
use heritage_core_db::repository::pagination::{Page, PageRequest};
use std::collections::HashSet;
use uuid::Uuid;

use crate::postgres_repositories::RepositorySession;

/// A catalog entry decorated with its social state
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    pub object: HeritageObjectModel,
    pub like_count: i64,
    pub viewer_liked: bool,
}

pub struct CatalogService;

impl CatalogService {
    /// All published objects, unfiltered
    pub async fn list(
        session: &RepositorySession,
        viewer: Option<&ActorIdentity>,
        page: PageRequest,
    ) -> ApiResult<Page<CatalogEntry>> {
        Self::browse(session, &CatalogFilter::default(), viewer, page).await
    }

    /// Combined region / type / title-search filter
    pub async fn browse(
        session: &RepositorySession,
        filter: &CatalogFilter,
        viewer: Option<&ActorIdentity>,
        page: PageRequest,
    ) -> ApiResult<Page<CatalogEntry>> {
        let (rows, total) = session
            .catalog
            .heritage_object_repository
            .browse(filter, page)
            .await?;

        let ids: Vec<Uuid> = rows.iter().map(|(object, _)| object.id).collect();
        let liked_ids = Self::liked_ids(session, viewer, &ids).await?;

        let items = rows
            .into_iter()
            .map(|(object, like_count)| CatalogEntry {
                viewer_liked: liked_ids.contains(&object.id),
                object,
                like_count,
            })
            .collect();

        Ok(Page::new(items, total as usize, page.limit, page.offset))
    }

    /// One object with its like state
    pub async fn detail(
        session: &RepositorySession,
        object_id: Uuid,
        viewer: Option<&ActorIdentity>,
    ) -> ApiResult<CatalogEntry> {
        let object = session
            .catalog
            .heritage_object_repository
            .load_batch(&[object_id])
            .await?
            .into_iter()
            .next()
            .flatten()
            .ok_or_else(|| ApiError::NotFound(format!("heritage object {object_id}")))?;

        let like_count = session
            .community
            .heritage_like_repository
            .count_by_object_id(object_id)
            .await?;
        let liked_ids = Self::liked_ids(session, viewer, &[object_id]).await?;

        Ok(CatalogEntry {
            viewer_liked: liked_ids.contains(&object_id),
            object,
            like_count,
        })
    }

    async fn liked_ids(
        session: &RepositorySession,
        viewer: Option<&ActorIdentity>,
        object_ids: &[Uuid],
    ) -> ApiResult<HashSet<Uuid>> {
        match viewer {
            Some(viewer) => Ok(session
                .community
                .heritage_like_repository
                .liked_object_ids(viewer.user_id, object_ids)
                .await?),
            None => Ok(HashSet::new()),
        }
    }
}
