use std::error::Error;
use uuid::Uuid;

use super::repo_impl::CommentLikeRepositoryImpl;

impl CommentLikeRepositoryImpl {
    /// Number of likes a comment currently has
    pub async fn count_by_comment_id(
        &self,
        comment_id: Uuid,
    ) -> Result<i64, Box<dyn Error + Send + Sync>> {
        let mut tx = self.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        let count: i64 =
            sqlx::query_scalar(r#"SELECT COUNT(*) FROM comment_like WHERE comment_id = $1"#)
                .bind(comment_id)
                .fetch_one(&mut **transaction)
                .await?;

        Ok(count)
    }
}
