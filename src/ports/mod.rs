//! Port traits the application depends on.
//!
//! Adapters implement these contracts; the application and http layers only
//! see the traits. Every port carries its own error enum, and component
//! operations return tagged results rather than panicking across the
//! boundary.

mod document_export;
mod generation_store;
mod issue_tracker;
mod llm_provider;
mod settings_store;
mod template_source;

pub use document_export::{Capability, DocumentExporter, ExportError, ExportFormat};
pub use generation_store::{GenerationStore, StoreError};
pub use issue_tracker::{IssueTracker, TrackerError, TrackerFactory};
pub use llm_provider::{ConnectionReport, LlmProvider, ProviderError, ProviderFactory};
pub use settings_store::SettingsStore;
pub use template_source::{TemplateDetail, TemplateReport, TemplateSource};
