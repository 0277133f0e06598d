use sqlx::{Postgres, Transaction};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Shared handle to a single database transaction
///
/// Cloned into every repository of a session so that all statements of one
/// unit of work run on the same transaction. Committing or rolling back
/// consumes the inner transaction; any statement issued afterwards fails with
/// "Transaction has been consumed". Dropping the last handle without a commit
/// rolls the transaction back.
#[derive(Clone)]
pub struct Executor {
    pub tx: Arc<Mutex<Option<Transaction<'static, Postgres>>>>,
}

impl Executor {
    pub fn new(tx: Transaction<'static, Postgres>) -> Self {
        Self {
            tx: Arc::new(Mutex::new(Some(tx))),
        }
    }

    /// Commit the underlying transaction
    pub async fn commit(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut guard = self.tx.lock().await;
        match guard.take() {
            Some(tx) => {
                tx.commit().await?;
                Ok(())
            }
            None => Err("Transaction has been consumed".into()),
        }
    }

    /// Roll the transaction back without waiting for drop
    pub async fn rollback(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut guard = self.tx.lock().await;
        match guard.take() {
            Some(tx) => {
                tx.rollback().await?;
                Ok(())
            }
            None => Err("Transaction has been consumed".into()),
        }
    }
}
