use async_trait::async_trait;
use heritage_core_db::models::identity::user_profile::UserProfileModel;
use heritage_core_db::repository::load::Load;
use heritage_core_db::repository::load_batch::LoadBatch;
use sqlx::postgres::PgRow;
use sqlx::{Postgres, Row};
use std::error::Error;
use uuid::Uuid;

use crate::executor::Executor;
use crate::utils::{get_optional_heapless_string, TryFromRow};

pub struct UserProfileRepositoryImpl {
    pub(crate) executor: Executor,
}

impl UserProfileRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}

#[async_trait]
impl Load<Postgres, UserProfileModel> for UserProfileRepositoryImpl {
    async fn load(&self, id: Uuid) -> Result<UserProfileModel, Box<dyn Error + Send + Sync>> {
        let results = self.load_batch(&[id]).await?;
        results
            .into_iter()
            .next()
            .flatten()
            .ok_or_else(|| "Entity not found".into())
    }
}

#[async_trait]
impl LoadBatch<Postgres, UserProfileModel> for UserProfileRepositoryImpl {
    async fn load_batch(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<Option<UserProfileModel>>, Box<dyn Error + Send + Sync>> {
        Self::load_batch_impl(self, ids).await
    }
}

impl TryFromRow<PgRow> for UserProfileModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(UserProfileModel {
            user_id: row.get("user_id"),
            bio: row.get("bio"),
            profile_photo_url: get_optional_heapless_string(row, "profile_photo_url")?,
            rank: row.get("rank"),
            created_at: row.get("created_at"),
        })
    }
}
