use sqlx::Row;
use std::collections::HashSet;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::CommentLikeRepositoryImpl;

impl CommentLikeRepositoryImpl {
    /// Which of the given comments the user has liked
    pub async fn liked_comment_ids(
        &self,
        user_id: Uuid,
        comment_ids: &[Uuid],
    ) -> Result<HashSet<Uuid>, Box<dyn Error + Send + Sync>> {
        if comment_ids.is_empty() {
            return Ok(HashSet::new());
        }

        let mut tx = self.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        let rows = sqlx::query(
            r#"SELECT comment_id FROM comment_like WHERE user_id = $1 AND comment_id = ANY($2)"#,
        )
        .bind(user_id)
        .bind(comment_ids)
        .fetch_all(&mut **transaction)
        .await?;

        rows.iter()
            .map(|row| row.try_get("comment_id").map_err(Into::into))
            .collect()
    }
}
