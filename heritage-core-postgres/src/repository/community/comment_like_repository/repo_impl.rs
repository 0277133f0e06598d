use heritage_core_db::models::community::likes::CommentLikeModel;
use sqlx::postgres::PgRow;
use sqlx::Row;
use std::error::Error;

use crate::executor::Executor;
use crate::utils::TryFromRow;

pub struct CommentLikeRepositoryImpl {
    pub(crate) executor: Executor,
}

impl CommentLikeRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}

impl TryFromRow<PgRow> for CommentLikeModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(CommentLikeModel {
            id: row.get("id"),
            user_id: row.get("user_id"),
            comment_id: row.get("comment_id"),
            created_at: row.get("created_at"),
        })
    }
}
