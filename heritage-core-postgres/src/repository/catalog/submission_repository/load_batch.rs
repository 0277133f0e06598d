use heritage_core_db::models::catalog::submission::SubmissionModel;
use sqlx::postgres::PgRow;
use std::collections::HashMap;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::SubmissionRepositoryImpl;
use crate::utils::TryFromRow;

impl SubmissionRepositoryImpl {
    pub(super) async fn load_batch_impl(
        repo: &SubmissionRepositoryImpl,
        ids: &[Uuid],
    ) -> Result<Vec<Option<SubmissionModel>>, Box<dyn Error + Send + Sync>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let query = r#"SELECT * FROM submission WHERE id = ANY($1)"#;
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
            let item = SubmissionModel::try_from_row(&row)?;
            item_map.insert(item.id, item);
        }

        let mut result = Vec::with_capacity(ids.len());
        for id in ids {
            result.push(item_map.remove(id));
        }
        Ok(result)
    }
}
