use heritage_core_api::domain::social::AuthorStats;
use sqlx::Row;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::CommentRepositoryImpl;

impl CommentRepositoryImpl {
    /// Aggregate stats for a comment author, computed on read
    ///
    /// Likes received are counted across all of the author's comments,
    /// including soft-deleted ones, matching what the like rows record.
    pub async fn author_stats(
        &self,
        user_id: Uuid,
    ) -> Result<AuthorStats, Box<dyn Error + Send + Sync>> {
        let mut tx = self.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        let row = sqlx::query(
            r#"
            SELECT
                (SELECT COUNT(*) FROM comment
                 WHERE user_id = $1 AND is_deleted = FALSE) AS total_comments,
                (SELECT COUNT(*) FROM comment_like cl
                 JOIN comment c ON c.id = cl.comment_id
                 WHERE c.user_id = $1) AS total_likes_received
            "#,
        )
        .bind(user_id)
        .fetch_one(&mut **transaction)
        .await?;

        Ok(AuthorStats {
            total_comments: row.try_get("total_comments")?,
            total_likes_received: row.try_get("total_likes_received")?,
        })
    }
}
