use heritage_core_db::models::community::comment::CommentModel;
use sqlx::postgres::PgRow;
use std::collections::HashMap;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::CommentRepositoryImpl;
use crate::utils::TryFromRow;

impl CommentRepositoryImpl {
    pub(super) async fn load_batch_impl(
        repo: &CommentRepositoryImpl,
        ids: &[Uuid],
    ) -> Result<Vec<Option<CommentModel>>, Box<dyn Error + Send + Sync>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let query = r#"SELECT * FROM comment WHERE id = ANY($1)"#;
        let rows: Vec<PgRow> = {
            let mut tx = repo.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query(query)
                .bind(ids)
                .fetch_all(&mut **transaction)
                .await?
        };

        let mut item_map = HashMap::new();
        for row in rows {
            let item = CommentModel::try_from_row(&row)?;
            item_map.insert(item.id, item);
        }

        let mut result = Vec::with_capacity(ids.len());
        for id in ids {
            result.push(item_map.remove(id));
        }
        Ok(result)
    }
}
