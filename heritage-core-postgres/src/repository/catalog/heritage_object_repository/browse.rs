use heritage_core_api::domain::catalog::CatalogFilter;
use heritage_core_db::models::catalog::heritage_object::HeritageObjectModel;
use heritage_core_db::repository::pagination::PageRequest;
use sqlx::postgres::PgRow;
use sqlx::Row;
use std::error::Error;

use super::repo_impl::HeritageObjectRepositoryImpl;
use crate::utils::TryFromRow;

impl HeritageObjectRepositoryImpl {
    /// Browse the published catalog with an optional combined filter
    ///
    /// Returns one page of objects with their like counts, plus the filtered
    /// total. Ordered by English title for stable pagination.
    pub async fn browse(
        &self,
        filter: &CatalogFilter,
        page: PageRequest,
    ) -> Result<(Vec<(HeritageObjectModel, i64)>, i64), Box<dyn Error + Send + Sync>> {
        let pattern = filter
            .query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(|q| q.to_string());

        let mut tx = self.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM heritage_object o
            WHERE ($1::region IS NULL OR o.region = $1)
              AND ($2::object_type IS NULL OR o.object_type = $2)
              AND ($3::text IS NULL OR o.title ILIKE '%' || $3 || '%')
            "#,
        )
        .bind(filter.region)
        .bind(filter.object_type)
        .bind(pattern.as_deref())
        .fetch_one(&mut **transaction)
        .await?;

        let rows: Vec<PgRow> = sqlx::query(
            r#"
            SELECT o.*, COUNT(l.id) AS like_count
            FROM heritage_object o
            LEFT JOIN heritage_like l ON l.object_id = o.id
            WHERE ($1::region IS NULL OR o.region = $1)
              AND ($2::object_type IS NULL OR o.object_type = $2)
              AND ($3::text IS NULL OR o.title ILIKE '%' || $3 || '%')
            GROUP BY o.id
            ORDER BY o.title ASC, o.id ASC
            LIMIT $4 OFFSET $5
            "#,
        )
        .bind(filter.region)
        .bind(filter.object_type)
        .bind(pattern.as_deref())
        .bind(page.limit as i64)
        .bind(page.offset as i64)
        .fetch_all(&mut **transaction)
        .await?;

        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            let like_count: i64 = row.try_get("like_count")?;
            items.push((HeritageObjectModel::try_from_row(&row)?, like_count));
        }

        Ok((items, total))
    }
}
