use heritage_core_db::models::community::comment::CommentModel;
use sqlx::postgres::PgRow;
use sqlx::Row;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::CommentRepositoryImpl;
use crate::utils::TryFromRow;

impl CommentRepositoryImpl {
    /// Visible top-level comments for an object with their like counts
    ///
    /// Ordered by like count, most liked first; ties broken by recency. This
    /// ordering is part of the listing contract, not a presentation choice.
    pub async fn find_top_level_by_object_id(
        &self,
        object_id: Uuid,
    ) -> Result<Vec<(CommentModel, i64)>, Box<dyn Error + Send + Sync>> {
        let rows: Vec<PgRow> = {
            let mut tx = self.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query(
                r#"
                SELECT c.*, COUNT(cl.id) AS like_count
                FROM comment c
                LEFT JOIN comment_like cl ON cl.comment_id = c.id
                WHERE c.object_id = $1 AND c.parent_id IS NULL AND c.is_deleted = FALSE
                GROUP BY c.id
                ORDER BY like_count DESC, c.created_at DESC
                "#,
            )
            .bind(object_id)
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
