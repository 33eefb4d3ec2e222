//! PostgreSQL store adapters.

mod generation_repository;
mod settings_repository;

pub use generation_repository::PostgresGenerationStore;
pub use settings_repository::PostgresSettingsStore;
