use chrono::{DateTime, Utc};
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::CommentLikeRepositoryImpl;

impl CommentLikeRepositoryImpl {
    /// Toggle the (user, comment) like pair
    ///
    /// Same contract as object likes: the unique constraint resolves
    /// concurrent inserts, and zero rows affected turns the toggle into a
    /// delete. Returns whether the like exists after the call.
    pub async fn toggle(
        &self,
        user_id: Uuid,
        comment_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<bool, Box<dyn Error + Send + Sync>> {
        let mut tx = self.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        let inserted = sqlx::query(
            r#"
            INSERT INTO comment_like (id, user_id, comment_id, created_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id, comment_id) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(comment_id)
        .bind(now)
        .execute(&mut **transaction)
        .await?;

        if inserted.rows_affected() == 1 {
            return Ok(true);
        }

        sqlx::query(r#"DELETE FROM comment_like WHERE user_id = $1 AND comment_id = $2"#)
            .bind(user_id)
            .bind(comment_id)
            .execute(&mut **transaction)
            .await?;

        Ok(false)
    }
}
