//! Domain types for the test plan generation service.
//!
//! Plain data: configuration records, issue details, and generation results.
//! No I/O lives here; persistence and transport belong to the adapters.

mod generation;
mod issue;
mod settings;

pub use generation::{GenerationId, GenerationRecord};
pub use issue::IssueDetails;
pub use settings::{
    ConnectionStatus, ProviderConfig, ProviderKind, TemplateConfig, TemplateFormat, TrackerConfig,
    ValidationStatus,
};
