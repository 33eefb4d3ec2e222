//! PostgreSQL implementation of the settings store.
//!
//! Each config kind lives in its own single-row table. A save is a
//! delete-then-insert inside one transaction, which is exactly the
//! documented overwrite semantics: the new row replaces the old wholesale.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::{
    ConnectionStatus, ProviderConfig, ProviderKind, TemplateConfig, TemplateFormat, TrackerConfig,
    ValidationStatus,
};
use crate::ports::{SettingsStore, StoreError};

/// PostgreSQL-backed settings store.
#[derive(Debug, Clone)]
pub struct PostgresSettingsStore {
    pool: PgPool,
}

impl PostgresSettingsStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SettingsStore for PostgresSettingsStore {
    async fn save_tracker(&self, config: &TrackerConfig) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM tracker_config")
            .execute(&mut *tx)
            .await?;
        sqlx::query(
            "INSERT INTO tracker_config \
             (domain, email, api_token, connection_status, last_tested_at) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(&config.domain)
        .bind(&config.email)
        .bind(&config.api_token)
        .bind(config.connection_status.as_str())
        .bind(config.last_tested_at)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(())
    }

    async fn load_tracker(&self) -> Result<Option<TrackerConfig>, StoreError> {
        let row = sqlx::query_as::<_, TrackerRow>(
            "SELECT domain, email, api_token, connection_status, last_tested_at \
             FROM tracker_config LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?;

        row.map(TrackerRow::into_domain).transpose()
    }

    async fn save_provider(&self, config: &ProviderConfig) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM provider_config")
            .execute(&mut *tx)
            .await?;
        sqlx::query(
            "INSERT INTO provider_config \
             (provider_kind, hosted_api_key, hosted_model, hosted_temperature, \
              hosted_max_tokens, local_url, local_model, connection_status, last_tested_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(config.provider_kind.as_str())
        .bind(&config.hosted_api_key)
        .bind(&config.hosted_model)
        .bind(config.hosted_temperature)
        .bind(config.hosted_max_tokens)
        .bind(&config.local_url)
        .bind(&config.local_model)
        .bind(config.connection_status.as_str())
        .bind(config.last_tested_at)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(())
    }

    async fn load_provider(&self) -> Result<Option<ProviderConfig>, StoreError> {
        let row = sqlx::query_as::<_, ProviderRow>(
            "SELECT provider_kind, hosted_api_key, hosted_model, hosted_temperature, \
             hosted_max_tokens, local_url, local_model, connection_status, last_tested_at \
             FROM provider_config LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?;

        row.map(ProviderRow::into_domain).transpose()
    }

    async fn save_template(&self, config: &TemplateConfig) -> Result<(), StoreError> {
        let format = config
            .file_format
            .map(|f| f.as_str())
            .unwrap_or("unsupported");

        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM template_config")
            .execute(&mut *tx)
            .await?;
        sqlx::query(
            "INSERT INTO template_config (file_path, file_format, validation_status) \
             VALUES ($1, $2, $3)",
        )
        .bind(&config.file_path)
        .bind(format)
        .bind(config.validation_status.as_str())
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(())
    }

    async fn load_template(&self) -> Result<Option<TemplateConfig>, StoreError> {
        let row = sqlx::query_as::<_, TemplateRow>(
            "SELECT file_path, file_format, validation_status FROM template_config LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?;

        row.map(TemplateRow::into_domain).transpose()
    }

    async fn record_tracker_test(
        &self,
        status: ConnectionStatus,
        tested_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        sqlx::query("UPDATE tracker_config SET connection_status = $1, last_tested_at = $2")
            .bind(status.as_str())
            .bind(tested_at)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn record_provider_test(
        &self,
        status: ConnectionStatus,
        tested_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        sqlx::query("UPDATE provider_config SET connection_status = $1, last_tested_at = $2")
            .bind(status.as_str())
            .bind(tested_at)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[derive(Debug, sqlx::FromRow)]
struct TrackerRow {
    domain: String,
    email: String,
    api_token: String,
    connection_status: String,
    last_tested_at: Option<DateTime<Utc>>,
}

impl TrackerRow {
    fn into_domain(self) -> Result<TrackerConfig, StoreError> {
        Ok(TrackerConfig {
            domain: self.domain,
            email: self.email,
            api_token: self.api_token,
            connection_status: parse_status(&self.connection_status)?,
            last_tested_at: self.last_tested_at,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ProviderRow {
    provider_kind: String,
    hosted_api_key: Option<String>,
    hosted_model: String,
    hosted_temperature: f64,
    hosted_max_tokens: i32,
    local_url: String,
    local_model: Option<String>,
    connection_status: String,
    last_tested_at: Option<DateTime<Utc>>,
}

impl ProviderRow {
    fn into_domain(self) -> Result<ProviderConfig, StoreError> {
        let provider_kind: ProviderKind = self
            .provider_kind
            .parse()
            .map_err(StoreError::database)?;

        Ok(ProviderConfig {
            provider_kind,
            hosted_api_key: self.hosted_api_key,
            hosted_model: self.hosted_model,
            hosted_temperature: self.hosted_temperature,
            hosted_max_tokens: self.hosted_max_tokens,
            local_url: self.local_url,
            local_model: self.local_model,
            connection_status: parse_status(&self.connection_status)?,
            last_tested_at: self.last_tested_at,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct TemplateRow {
    file_path: String,
    file_format: String,
    validation_status: String,
}

impl TemplateRow {
    fn into_domain(self) -> Result<TemplateConfig, StoreError> {
        let validation_status: ValidationStatus = self
            .validation_status
            .parse()
            .map_err(StoreError::database)?;

        Ok(TemplateConfig {
            file_path: self.file_path,
            file_format: self.file_format.parse::<TemplateFormat>().ok(),
            validation_status,
        })
    }
}

fn parse_status(raw: &str) -> Result<ConnectionStatus, StoreError> {
    raw.parse().map_err(StoreError::database)
}
