use heritage_core_db::models::community::comment::CommentModel;
use sqlx::postgres::PgRow;
use sqlx::Row;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::CommentRepositoryImpl;
use crate::utils::TryFromRow;

impl CommentRepositoryImpl {
    /// Visible replies for a set of top-level comments, oldest first
    pub async fn find_replies_by_parent_ids(
        &self,
        parent_ids: &[Uuid],
    ) -> Result<Vec<(CommentModel, i64)>, Box<dyn Error + Send + Sync>> {
        if parent_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows: Vec<PgRow> = {
            let mut tx = self.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query(
                r#"
                SELECT c.*, COUNT(cl.id) AS like_count
                FROM comment c
                LEFT JOIN comment_like cl ON cl.comment_id = c.id
                WHERE c.parent_id = ANY($1) AND c.is_deleted = FALSE
                GROUP BY c.id
                ORDER BY c.created_at ASC
                "#,
            )
            .bind(parent_ids)
            .fetch_all(&mut **transaction)
            .await?
        };

        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            let like_count: i64 = row.try_get("like_count")?;
            items.push((CommentModel::try_from_row(&row)?, like_count));
        }
        Ok(items)
    }
}
