use async_trait::async_trait;
use sqlx::Database;
use uuid::Uuid;

/// Generic repository trait for checking existence of multiple entities
///
/// Returns a tuple per requested ID so callers can report precisely which
/// records are missing.
///
/// # Type Parameters
/// * `DB` - The database type (must implement sqlx::Database)
#[async_trait]
pub trait ExistByIds<DB: Database>: Send + Sync {
    /// Check existence of multiple entities by their unique identifiers
    ///
    /// # Arguments
    /// * `ids` - A slice of UUIDs to check
    ///
    /// # Returns
    /// * `Ok(Vec<(Uuid, bool)>)` - Each ID paired with its existence status
    /// * `Err` - An error if the query could not be executed
    async fn exist_by_ids(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<(Uuid, bool)>, Box<dyn std::error::Error + Send + Sync>>;
}
