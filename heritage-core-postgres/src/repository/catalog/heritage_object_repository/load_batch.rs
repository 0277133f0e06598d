use heritage_core_db::models::catalog::heritage_object::HeritageObjectModel;
use sqlx::postgres::PgRow;
use std::collections::HashMap;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::HeritageObjectRepositoryImpl;
use crate::utils::TryFromRow;

impl HeritageObjectRepositoryImpl {
    pub(super) async fn load_batch_impl(
        repo: &HeritageObjectRepositoryImpl,
        ids: &[Uuid],
    ) -> Result<Vec<Option<HeritageObjectModel>>, Box<dyn Error + Send + Sync>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let query = r#"SELECT * FROM heritage_object WHERE id = ANY($1)"#;
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
            let item = HeritageObjectModel::try_from_row(&row)?;
            item_map.insert(item.id, item);
        }

        let mut result = Vec::with_capacity(ids.len());
        for id in ids {
            result.push(item_map.remove(id));
        }
        Ok(result)
    }
}
