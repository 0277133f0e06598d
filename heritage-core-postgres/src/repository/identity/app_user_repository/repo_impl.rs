use async_trait::async_trait;
use heritage_core_db::models::identity::app_user::{AppUserIdxModel, AppUserModel};
use heritage_core_db::repository::load::Load;
use heritage_core_db::repository::load_batch::LoadBatch;
use sqlx::postgres::PgRow;
use sqlx::{Postgres, Row};
use std::error::Error;
use uuid::Uuid;

use crate::executor::Executor;
use crate::utils::{get_heapless_string, get_optional_heapless_string, TryFromRow};

pub struct AppUserRepositoryImpl {
    pub(crate) executor: Executor,
}

impl AppUserRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}

#[async_trait]
impl Load<Postgres, AppUserModel> for AppUserRepositoryImpl {
    async fn load(&self, id: Uuid) -> Result<AppUserModel, Box<dyn Error + Send + Sync>> {
        let results = self.load_batch(&[id]).await?;
        results
            .into_iter()
            .next()
            .flatten()
            .ok_or_else(|| "Entity not found".into())
    }
}

#[async_trait]
impl LoadBatch<Postgres, AppUserModel> for AppUserRepositoryImpl {
    async fn load_batch(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<Option<AppUserModel>>, Box<dyn Error + Send + Sync>> {
        Self::load_batch_impl(self, ids).await
    }
}

impl TryFromRow<PgRow> for AppUserModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(AppUserModel {
            id: row.get("id"),
            username: get_heapless_string(row, "username")?,
            email: get_optional_heapless_string(row, "email")?,
            is_staff: row.get("is_staff"),
            is_superuser: row.get("is_superuser"),
            date_joined: row.get("date_joined"),
        })
    }
}

impl TryFromRow<PgRow> for AppUserIdxModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(AppUserIdxModel {
            id: row.get("id"),
            username_hash: row.try_get("username_hash")?,
        })
    }
}
