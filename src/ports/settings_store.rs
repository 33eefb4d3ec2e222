//! Settings Store Port - Single-row configuration persistence.
//!
//! Each config kind occupies at most one row. `save_*` replaces the whole
//! row (no field merging); `load_*` returns `None` when nothing has been
//! configured. Connection tests record their outcome through the
//! `record_*_test` operations without rewriting credentials.
//!
//! Concurrent saves race last-write-wins; configuration changes are rare
//! and human-driven, so no transactional isolation is promised beyond the
//! single replace.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::StoreError;
use crate::domain::{ConnectionStatus, ProviderConfig, TemplateConfig, TrackerConfig};

/// Port for the configuration store.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn save_tracker(&self, config: &TrackerConfig) -> Result<(), StoreError>;
    async fn load_tracker(&self) -> Result<Option<TrackerConfig>, StoreError>;

    async fn save_provider(&self, config: &ProviderConfig) -> Result<(), StoreError>;
    async fn load_provider(&self) -> Result<Option<ProviderConfig>, StoreError>;

    async fn save_template(&self, config: &TemplateConfig) -> Result<(), StoreError>;
    async fn load_template(&self) -> Result<Option<TemplateConfig>, StoreError>;

    /// Persist the outcome of a tracker connection test.
    async fn record_tracker_test(
        &self,
        status: ConnectionStatus,
        tested_at: DateTime<Utc>,
    ) -> Result<(), StoreError>;

    /// Persist the outcome of a provider connection test.
    async fn record_provider_test(
        &self,
        status: ConnectionStatus,
        tested_at: DateTime<Utc>,
    ) -> Result<(), StoreError>;
}
