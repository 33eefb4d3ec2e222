//! In-memory store implementations.
//!
//! Back the same ports as the PostgreSQL adapters with process-local state.
//! Used by the test suites and for database-less development; semantics
//! (single row, full overwrite, immutable history) match the real store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Mutex;

use crate::domain::{
    ConnectionStatus, GenerationId, GenerationRecord, ProviderConfig, TemplateConfig,
    TrackerConfig,
};
use crate::ports::{GenerationStore, SettingsStore, StoreError};

/// Process-local settings store.
#[derive(Debug, Default)]
pub struct InMemorySettingsStore {
    tracker: Mutex<Option<TrackerConfig>>,
    provider: Mutex<Option<ProviderConfig>>,
    template: Mutex<Option<TemplateConfig>>,
}

impl InMemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SettingsStore for InMemorySettingsStore {
    async fn save_tracker(&self, config: &TrackerConfig) -> Result<(), StoreError> {
        *self.tracker.lock().unwrap() = Some(config.clone());
        Ok(())
    }

    async fn load_tracker(&self) -> Result<Option<TrackerConfig>, StoreError> {
        Ok(self.tracker.lock().unwrap().clone())
    }

    async fn save_provider(&self, config: &ProviderConfig) -> Result<(), StoreError> {
        *self.provider.lock().unwrap() = Some(config.clone());
        Ok(())
    }

    async fn load_provider(&self) -> Result<Option<ProviderConfig>, StoreError> {
        Ok(self.provider.lock().unwrap().clone())
    }

    async fn save_template(&self, config: &TemplateConfig) -> Result<(), StoreError> {
        *self.template.lock().unwrap() = Some(config.clone());
        Ok(())
    }

    async fn load_template(&self) -> Result<Option<TemplateConfig>, StoreError> {
        Ok(self.template.lock().unwrap().clone())
    }

    async fn record_tracker_test(
        &self,
        status: ConnectionStatus,
        tested_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        if let Some(config) = self.tracker.lock().unwrap().as_mut() {
            config.connection_status = status;
            config.last_tested_at = Some(tested_at);
        }
        Ok(())
    }

    async fn record_provider_test(
        &self,
        status: ConnectionStatus,
        tested_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        if let Some(config) = self.provider.lock().unwrap().as_mut() {
            config.connection_status = status;
            config.last_tested_at = Some(tested_at);
        }
        Ok(())
    }
}

/// Process-local generation history.
#[derive(Debug, Default)]
pub struct InMemoryGenerationStore {
    records: Mutex<Vec<GenerationRecord>>,
}

impl InMemoryGenerationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GenerationStore for InMemoryGenerationStore {
    async fn insert(&self, record: &GenerationRecord) -> Result<(), StoreError> {
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }

    async fn fetch(&self, id: GenerationId) -> Result<Option<GenerationRecord>, StoreError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }

    async fn list_recent(&self, limit: u32) -> Result<Vec<GenerationRecord>, StoreError> {
        let records = self.records.lock().unwrap();
        let mut recent: Vec<GenerationRecord> = records.iter().cloned().collect();
        recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        recent.truncate(limit as usize);
        Ok(recent)
    }
}
