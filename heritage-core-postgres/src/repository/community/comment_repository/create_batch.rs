use async_trait::async_trait;
use heritage_core_db::models::community::comment::CommentModel;
use heritage_core_db::repository::create_batch::CreateBatch;
use sqlx::Postgres;
use std::error::Error;

use super::repo_impl::CommentRepositoryImpl;

impl CommentRepositoryImpl {
    pub(super) async fn create_batch_impl(
        repo: &CommentRepositoryImpl,
        items: Vec<CommentModel>,
    ) -> Result<Vec<CommentModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut saved_items = Vec::new();

        let mut tx = repo.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        for item in items {
            sqlx::query(
                r#"
                INSERT INTO comment (
                    id, user_id, object_id, body, parent_id, is_deleted,
                    created_at, updated_at
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                "#,
            )
            .bind(item.id)
            .bind(item.user_id)
            .bind(item.object_id)
            .bind(item.body.as_str())
            .bind(item.parent_id)
            .bind(item.is_deleted)
            .bind(item.created_at)
            .bind(item.updated_at)
            .execute(&mut **transaction)
            .await?;

            saved_items.push(item);
        }

        Ok(saved_items)
    }
}

#[async_trait]
impl CreateBatch<Postgres, CommentModel> for CommentRepositoryImpl {
    async fn create_batch(
        &self,
        items: Vec<CommentModel>,
    ) -> Result<Vec<CommentModel>, Box<dyn Error + Send + Sync>> {
        Self::create_batch_impl(self, items).await
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_utils::test_utils::create_test_comment;
    use crate::repository::catalog::heritage_object_repository::test_utils::test_utils::create_test_object;
    use crate::repository::identity::app_user_repository::test_utils::test_utils::create_test_user;
    use crate::test_helper::setup_test_context;
    use heritage_core_db::repository::create_batch::CreateBatch;
    use heritage_core_db::repository::load::Load;

    #[tokio::test]
    async fn test_create_comment() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let user_repo = &ctx.identity_repos().app_user_repository;
        let object_repo = &ctx.catalog_repos().heritage_object_repository;
        let comment_repo = &ctx.community_repos().comment_repository;

        let user = create_test_user("commenter", false);
        user_repo.create_batch(vec![user.clone()]).await?;
        let object = create_test_object("Commented object");
        object_repo.create_batch(vec![object.clone()]).await?;

        let comment = create_test_comment(user.id, object.id, "What a beautiful piece!", None);
        comment_repo.create_batch(vec![comment.clone()]).await?;

        let loaded = comment_repo.load(comment.id).await?;
        assert_eq!(loaded.body, "What a beautiful piece!");
        assert!(!loaded.is_deleted);
        assert!(!loaded.is_reply());

        Ok(())
    }
}
