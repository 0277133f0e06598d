use std::error::Error;
use uuid::Uuid;

use super::repo_impl::HeritageLikeRepositoryImpl;

impl HeritageLikeRepositoryImpl {
    /// Number of likes an object currently has
    pub async fn count_by_object_id(
        &self,
        object_id: Uuid,
    ) -> Result<i64, Box<dyn Error + Send + Sync>> {
        let mut tx = self.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        let count: i64 =
            sqlx::query_scalar(r#"SELECT COUNT(*) FROM heritage_like WHERE object_id = $1"#)
                .bind(object_id)
                .fetch_one(&mut **transaction)
                .await?;

        Ok(count)
    }
}
