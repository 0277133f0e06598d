use heritage_core_db::models::community::likes::HeritageLikeModel;
use sqlx::postgres::PgRow;
use sqlx::Row;
use std::error::Error;

use crate::executor::Executor;
use crate::utils::TryFromRow;

pub struct HeritageLikeRepositoryImpl {
    pub(crate) executor: Executor,
}

impl HeritageLikeRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}

impl TryFromRow<PgRow> for HeritageLikeModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(HeritageLikeModel {
            id: row.get("id"),
            user_id: row.get("user_id"),
            object_id: row.get("object_id"),
            created_at: row.get("created_at"),
        })
    }
}
