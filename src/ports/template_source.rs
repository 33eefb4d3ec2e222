//! Template Source Port - Template validation and text loading.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::{TemplateFormat, ValidationStatus};

/// Port for reading and validating template files.
#[async_trait]
pub trait TemplateSource: Send + Sync {
    /// Classify and validate the file at `path`.
    ///
    /// Never errors: problems (missing file, unsupported extension,
    /// unreadable content) are part of the report.
    async fn validate(&self, path: &str) -> TemplateReport;

    /// Extract the template's plain text.
    ///
    /// `None` on any extraction failure — the caller must treat absence as
    /// "no template", not as empty content.
    async fn load_text(&self, path: &str) -> Option<String>;
}

/// Validation outcome for a template file.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateReport {
    pub status: ValidationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<TemplateFormat>,
    /// Short human-readable summary.
    pub message: String,
    /// Raw error detail when validation failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(flatten)]
    pub detail: TemplateDetail,
}

/// Size information gathered during validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateDetail {
    /// Character count of a text/markdown template.
    Size { size: usize },
    /// Page count of a paginated template.
    Pages { pages: usize },
    /// The file exists but its content was not examined (page-extraction
    /// capability absent in this build).
    Unverified,
}

impl TemplateReport {
    pub fn valid(format: TemplateFormat, message: impl Into<String>, detail: TemplateDetail) -> Self {
        Self {
            status: ValidationStatus::Valid,
            format: Some(format),
            message: message.into(),
            error: None,
            detail,
        }
    }

    pub fn warning(
        format: TemplateFormat,
        message: impl Into<String>,
        detail: TemplateDetail,
    ) -> Self {
        Self {
            status: ValidationStatus::Warning,
            format: Some(format),
            message: message.into(),
            error: None,
            detail,
        }
    }

    pub fn failed(message: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            status: ValidationStatus::Failed,
            format: None,
            message: message.into(),
            error: Some(error.into()),
            detail: TemplateDetail::Unverified,
        }
    }
}
