//! Generation Store Port - Persisted generation history.
//!
//! Records are written once and never mutated. History is retained
//! indefinitely; listing is capped per query but nothing is evicted.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{GenerationId, GenerationRecord};

/// Port for generation record persistence.
#[async_trait]
pub trait GenerationStore: Send + Sync {
    /// Insert a freshly generated record.
    async fn insert(&self, record: &GenerationRecord) -> Result<(), StoreError>;

    /// Fetch one record by id. `None` when the id is unknown.
    async fn fetch(&self, id: GenerationId) -> Result<Option<GenerationRecord>, StoreError>;

    /// Most recent records, newest first.
    async fn list_recent(&self, limit: u32) -> Result<Vec<GenerationRecord>, StoreError>;
}

/// Persistence errors, shared by the settings and generation stores.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(String),
}

impl StoreError {
    pub fn database(message: impl Into<String>) -> Self {
        Self::Database(message.into())
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(err.to_string())
    }
}
