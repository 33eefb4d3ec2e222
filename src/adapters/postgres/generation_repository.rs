//! PostgreSQL implementation of the generation store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{GenerationId, GenerationRecord};
use crate::ports::{GenerationStore, StoreError};

/// PostgreSQL-backed generation history.
#[derive(Debug, Clone)]
pub struct PostgresGenerationStore {
    pool: PgPool,
}

impl PostgresGenerationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GenerationStore for PostgresGenerationStore {
    async fn insert(&self, record: &GenerationRecord) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO generation_history \
             (id, source_issue_id, source_summary, generated_content, provider_used, \
              generation_seconds, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(record.id.as_uuid())
        .bind(&record.source_issue_id)
        .bind(&record.source_summary)
        .bind(&record.generated_content)
        .bind(&record.provider_used)
        .bind(record.generation_seconds)
        .bind(record.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn fetch(&self, id: GenerationId) -> Result<Option<GenerationRecord>, StoreError> {
        let row = sqlx::query_as::<_, GenerationRow>(
            "SELECT id, source_issue_id, source_summary, generated_content, provider_used, \
             generation_seconds, created_at \
             FROM generation_history WHERE id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(GenerationRow::into_domain))
    }

    async fn list_recent(&self, limit: u32) -> Result<Vec<GenerationRecord>, StoreError> {
        let rows = sqlx::query_as::<_, GenerationRow>(
            "SELECT id, source_issue_id, source_summary, generated_content, provider_used, \
             generation_seconds, created_at \
             FROM generation_history ORDER BY created_at DESC LIMIT $1",
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(GenerationRow::into_domain).collect())
    }
}

#[derive(Debug, sqlx::FromRow)]
struct GenerationRow {
    id: Uuid,
    source_issue_id: String,
    source_summary: String,
    generated_content: String,
    provider_used: String,
    generation_seconds: f64,
    created_at: DateTime<Utc>,
}

impl GenerationRow {
    fn into_domain(self) -> GenerationRecord {
        GenerationRecord {
            id: GenerationId::from_uuid(self.id),
            source_issue_id: self.source_issue_id,
            source_summary: self.source_summary,
            generated_content: self.generated_content,
            provider_used: self.provider_used,
            generation_seconds: self.generation_seconds,
            created_at: self.created_at,
        }
    }
}
