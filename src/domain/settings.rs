//! Configuration records for the three external collaborators.
//!
//! Each record maps to a single-row table with full-overwrite save
//! semantics: saving replaces any prior row, it never merges fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of the most recent connection test for a collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionStatus {
    /// No test has been run since the configuration was saved.
    Untested,
    /// The last test reached the collaborator and authenticated.
    Connected,
    /// The last test failed (unreachable, rejected, or timed out).
    Failed,
}

impl ConnectionStatus {
    /// Database/text representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionStatus::Untested => "untested",
            ConnectionStatus::Connected => "connected",
            ConnectionStatus::Failed => "failed",
        }
    }
}

impl std::fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ConnectionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "untested" => Ok(ConnectionStatus::Untested),
            "connected" => Ok(ConnectionStatus::Connected),
            "failed" => Ok(ConnectionStatus::Failed),
            other => Err(format!("unknown connection status: {other}")),
        }
    }
}

/// Outcome of template validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationStatus {
    Untested,
    Valid,
    /// Usable but suspicious, e.g. a template under ten characters.
    Warning,
    Failed,
}

impl ValidationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationStatus::Untested => "untested",
            ValidationStatus::Valid => "valid",
            ValidationStatus::Warning => "warning",
            ValidationStatus::Failed => "failed",
        }
    }
}

impl std::fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ValidationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "untested" => Ok(ValidationStatus::Untested),
            "valid" => Ok(ValidationStatus::Valid),
            "warning" => Ok(ValidationStatus::Warning),
            "failed" => Ok(ValidationStatus::Failed),
            other => Err(format!("unknown validation status: {other}")),
        }
    }
}

/// The two supported language-model backends.
///
/// A closed set: provider selection is an exhaustive match, never runtime
/// type inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// Hosted chat-completion API (Bearer-token auth).
    Hosted,
    /// Locally reachable model server (Ollama-style API).
    Local,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Hosted => "hosted",
            ProviderKind::Local => "local",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hosted" => Ok(ProviderKind::Hosted),
            "local" => Ok(ProviderKind::Local),
            other => Err(format!("unknown provider kind: {other}")),
        }
    }
}

/// Template file classification, derived from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateFormat {
    /// Paginated document (`.pdf`).
    Pdf,
    /// Markdown (`.md`).
    Markdown,
    /// Plain text (`.txt`).
    Text,
}

impl TemplateFormat {
    /// Classify a path by extension. `None` means unsupported.
    pub fn from_path(path: &str) -> Option<Self> {
        let ext = std::path::Path::new(path)
            .extension()
            .and_then(|e| e.to_str())?
            .to_ascii_lowercase();
        match ext.as_str() {
            "pdf" => Some(TemplateFormat::Pdf),
            "md" => Some(TemplateFormat::Markdown),
            "txt" => Some(TemplateFormat::Text),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateFormat::Pdf => "pdf",
            TemplateFormat::Markdown => "markdown",
            TemplateFormat::Text => "text",
        }
    }
}

impl std::fmt::Display for TemplateFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TemplateFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pdf" => Ok(TemplateFormat::Pdf),
            "markdown" | "md" => Ok(TemplateFormat::Markdown),
            "text" | "txt" => Ok(TemplateFormat::Text),
            other => Err(format!("unknown template format: {other}")),
        }
    }
}

/// Issue tracker connection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Tracker host, e.g. `yourteam.atlassian.net`.
    pub domain: String,
    /// Account email for Basic auth.
    pub email: String,
    /// API token paired with the email.
    pub api_token: String,
    pub connection_status: ConnectionStatus,
    pub last_tested_at: Option<DateTime<Utc>>,
}

impl TrackerConfig {
    /// A freshly saved configuration, not yet tested.
    pub fn new(
        domain: impl Into<String>,
        email: impl Into<String>,
        api_token: impl Into<String>,
    ) -> Self {
        Self {
            domain: domain.into(),
            email: email.into(),
            api_token: api_token.into(),
            connection_status: ConnectionStatus::Untested,
            last_tested_at: None,
        }
    }
}

/// Language-model provider settings.
///
/// Carries the fields of both variants; `provider_kind` selects which set
/// is consulted when a provider instance is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub provider_kind: ProviderKind,
    pub hosted_api_key: Option<String>,
    #[serde(default = "default_hosted_model")]
    pub hosted_model: String,
    #[serde(default = "default_temperature")]
    pub hosted_temperature: f64,
    #[serde(default = "default_max_tokens")]
    pub hosted_max_tokens: i32,
    #[serde(default = "default_local_url")]
    pub local_url: String,
    pub local_model: Option<String>,
    #[serde(default = "untested")]
    pub connection_status: ConnectionStatus,
    #[serde(default)]
    pub last_tested_at: Option<DateTime<Utc>>,
}

impl ProviderConfig {
    /// A hosted-provider configuration with field defaults.
    pub fn hosted(api_key: impl Into<String>) -> Self {
        Self {
            provider_kind: ProviderKind::Hosted,
            hosted_api_key: Some(api_key.into()),
            ..Self::new(ProviderKind::Hosted)
        }
    }

    /// A local-provider configuration with field defaults.
    pub fn local(model: impl Into<String>) -> Self {
        Self {
            local_model: Some(model.into()),
            ..Self::new(ProviderKind::Local)
        }
    }

    /// An untested configuration of the given kind with all field defaults.
    pub fn new(kind: ProviderKind) -> Self {
        Self {
            provider_kind: kind,
            hosted_api_key: None,
            hosted_model: default_hosted_model(),
            hosted_temperature: default_temperature(),
            hosted_max_tokens: default_max_tokens(),
            local_url: default_local_url(),
            local_model: None,
            connection_status: ConnectionStatus::Untested,
            last_tested_at: None,
        }
    }
}

/// Template file settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateConfig {
    pub file_path: String,
    pub file_format: Option<TemplateFormat>,
    pub validation_status: ValidationStatus,
}

fn default_hosted_model() -> String {
    "grok-2".to_string()
}

fn default_temperature() -> f64 {
    0.7
}

fn default_max_tokens() -> i32 {
    2000
}

fn default_local_url() -> String {
    "http://localhost:11434".to_string()
}

fn untested() -> ConnectionStatus {
    ConnectionStatus::Untested
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_defaults_match_documented_values() {
        let config = ProviderConfig::hosted("key");
        assert_eq!(config.hosted_model, "grok-2");
        assert_eq!(config.hosted_temperature, 0.7);
        assert_eq!(config.hosted_max_tokens, 2000);
        assert_eq!(config.local_url, "http://localhost:11434");
        assert_eq!(config.connection_status, ConnectionStatus::Untested);
    }

    #[test]
    fn template_format_classifies_by_extension() {
        assert_eq!(
            TemplateFormat::from_path("plan.pdf"),
            Some(TemplateFormat::Pdf)
        );
        assert_eq!(
            TemplateFormat::from_path("plan.MD"),
            Some(TemplateFormat::Markdown)
        );
        assert_eq!(
            TemplateFormat::from_path("notes.txt"),
            Some(TemplateFormat::Text)
        );
        assert_eq!(TemplateFormat::from_path("plan.docx"), None);
        assert_eq!(TemplateFormat::from_path("no_extension"), None);
    }

    #[test]
    fn statuses_round_trip_through_strings() {
        for status in [
            ConnectionStatus::Untested,
            ConnectionStatus::Connected,
            ConnectionStatus::Failed,
        ] {
            assert_eq!(status.as_str().parse::<ConnectionStatus>().unwrap(), status);
        }
        for status in [
            ValidationStatus::Untested,
            ValidationStatus::Valid,
            ValidationStatus::Warning,
            ValidationStatus::Failed,
        ] {
            assert_eq!(status.as_str().parse::<ValidationStatus>().unwrap(), status);
        }
    }
}
