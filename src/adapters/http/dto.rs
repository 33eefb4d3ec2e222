//! HTTP DTOs.
//!
//! These types decouple the wire shapes from the domain records. Stored
//! credentials never appear in responses; GET endpoints report only
//! whether a secret is set.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    ConnectionStatus, GenerationRecord, IssueDetails, ProviderConfig, ProviderKind,
    TemplateConfig, TemplateFormat, TrackerConfig, ValidationStatus,
};
use crate::ports::{Capability, ConnectionReport, TemplateReport};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to save issue tracker settings.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackerConfigRequest {
    pub domain: String,
    pub email: String,
    pub api_token: String,
}

impl TrackerConfigRequest {
    pub fn into_domain(self) -> TrackerConfig {
        TrackerConfig::new(self.domain, self.email, self.api_token)
    }
}

/// Request to save provider settings. Omitted fields take documented
/// defaults; `model` lands on the field matching `provider_kind`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfigRequest {
    pub provider_kind: ProviderKind,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub max_tokens: Option<i32>,
    #[serde(default)]
    pub local_url: Option<String>,
}

impl ProviderConfigRequest {
    pub fn into_domain(self) -> ProviderConfig {
        let mut config = ProviderConfig::new(self.provider_kind);
        if let Some(key) = self.api_key {
            config.hosted_api_key = Some(key);
        }
        if let Some(model) = self.model {
            match self.provider_kind {
                ProviderKind::Hosted => config.hosted_model = model,
                ProviderKind::Local => config.local_model = Some(model),
            }
        }
        if let Some(temperature) = self.temperature {
            config.hosted_temperature = temperature;
        }
        if let Some(max_tokens) = self.max_tokens {
            config.hosted_max_tokens = max_tokens;
        }
        if let Some(url) = self.local_url {
            config.local_url = url;
        }
        config
    }
}

/// Request to save template settings.
#[derive(Debug, Clone, Deserialize)]
pub struct TemplateConfigRequest {
    pub file_path: String,
}

/// Request to generate a test plan from issue fields.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateRequest {
    pub issue_key: String,
    pub summary: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub acceptance_criteria: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub issue_type: Option<String>,
}

impl GenerateRequest {
    pub fn into_issue(self) -> IssueDetails {
        IssueDetails {
            key: self.issue_key,
            summary: self.summary,
            description: self.description,
            acceptance_criteria: self.acceptance_criteria,
            priority: self.priority,
            issue_type: self.issue_type,
        }
    }
}

/// Query parameters for the history listing.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryQuery {
    #[serde(default = "default_history_limit")]
    pub limit: u32,
}

fn default_history_limit() -> u32 {
    20
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Service health plus optional capabilities of this build.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
    pub pdf_export: Capability,
    pub docx_export: Capability,
    pub pdf_templates: Capability,
}

/// Tracker settings with the token masked.
#[derive(Debug, Clone, Serialize)]
pub struct TrackerConfigResponse {
    pub domain: String,
    pub email: String,
    pub api_token_set: bool,
    pub connection_status: ConnectionStatus,
    pub last_tested_at: Option<DateTime<Utc>>,
}

impl From<TrackerConfig> for TrackerConfigResponse {
    fn from(config: TrackerConfig) -> Self {
        Self {
            domain: config.domain,
            email: config.email,
            api_token_set: !config.api_token.is_empty(),
            connection_status: config.connection_status,
            last_tested_at: config.last_tested_at,
        }
    }
}

/// Provider settings with the API key masked.
#[derive(Debug, Clone, Serialize)]
pub struct ProviderConfigResponse {
    pub provider_kind: ProviderKind,
    pub api_key_set: bool,
    pub hosted_model: String,
    pub hosted_temperature: f64,
    pub hosted_max_tokens: i32,
    pub local_url: String,
    pub local_model: Option<String>,
    pub connection_status: ConnectionStatus,
    pub last_tested_at: Option<DateTime<Utc>>,
}

impl From<ProviderConfig> for ProviderConfigResponse {
    fn from(config: ProviderConfig) -> Self {
        Self {
            provider_kind: config.provider_kind,
            api_key_set: config
                .hosted_api_key
                .as_deref()
                .is_some_and(|key| !key.is_empty()),
            hosted_model: config.hosted_model,
            hosted_temperature: config.hosted_temperature,
            hosted_max_tokens: config.hosted_max_tokens,
            local_url: config.local_url,
            local_model: config.local_model,
            connection_status: config.connection_status,
            last_tested_at: config.last_tested_at,
        }
    }
}

/// Stored template settings.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateConfigResponse {
    pub file_path: String,
    pub file_format: Option<TemplateFormat>,
    pub validation_status: ValidationStatus,
}

impl From<TemplateConfig> for TemplateConfigResponse {
    fn from(config: TemplateConfig) -> Self {
        Self {
            file_path: config.file_path,
            file_format: config.file_format,
            validation_status: config.validation_status,
        }
    }
}

/// Outcome of saving a template: the stored config plus its validation.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateSaveResponse {
    #[serde(flatten)]
    pub config: TemplateConfigResponse,
    pub validation: TemplateReport,
}

/// Outcome of a connection test, with the timestamp that was persisted.
#[derive(Debug, Clone, Serialize)]
pub struct ConnectionTestResponse {
    #[serde(flatten)]
    pub report: ConnectionReport,
    pub tested_at: DateTime<Utc>,
}

/// Export download links for one generation.
#[derive(Debug, Clone, Serialize)]
pub struct ExportLinks {
    pub markdown: String,
    pub pdf: String,
    pub docx: String,
}

impl ExportLinks {
    pub fn for_id(id: impl std::fmt::Display) -> Self {
        Self {
            markdown: format!("/api/export/{id}/md"),
            pdf: format!("/api/export/{id}/pdf"),
            docx: format!("/api/export/{id}/docx"),
        }
    }
}

/// A freshly generated plan: full record plus export links.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationResponse {
    pub id: String,
    pub source_issue_id: String,
    pub source_summary: String,
    pub generated_content: String,
    pub provider_used: String,
    pub generation_seconds: f64,
    pub created_at: DateTime<Utc>,
    pub exports: ExportLinks,
}

impl From<GenerationRecord> for GenerationResponse {
    fn from(record: GenerationRecord) -> Self {
        Self {
            id: record.id.to_string(),
            exports: ExportLinks::for_id(record.id),
            source_issue_id: record.source_issue_id,
            source_summary: record.source_summary,
            generated_content: record.generated_content,
            provider_used: record.provider_used,
            generation_seconds: record.generation_seconds,
            created_at: record.created_at,
        }
    }
}

/// History listing entry: metadata only, no plan text.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationSummary {
    pub id: String,
    pub source_issue_id: String,
    pub source_summary: String,
    pub provider_used: String,
    pub generation_seconds: f64,
    pub created_at: DateTime<Utc>,
    pub exports: ExportLinks,
}

impl From<GenerationRecord> for GenerationSummary {
    fn from(record: GenerationRecord) -> Self {
        Self {
            id: record.id.to_string(),
            exports: ExportLinks::for_id(record.id),
            source_issue_id: record.source_issue_id,
            source_summary: record.source_summary,
            provider_used: record.provider_used,
            generation_seconds: record.generation_seconds,
            created_at: record.created_at,
        }
    }
}

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: &'static str,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_request_fills_kind_specific_model() {
        let hosted = ProviderConfigRequest {
            provider_kind: ProviderKind::Hosted,
            api_key: Some("key".into()),
            model: Some("grok-2-mini".into()),
            temperature: None,
            max_tokens: None,
            local_url: None,
        };
        let config = hosted.into_domain();
        assert_eq!(config.hosted_model, "grok-2-mini");
        assert_eq!(config.local_model, None);

        let local = ProviderConfigRequest {
            provider_kind: ProviderKind::Local,
            api_key: None,
            model: Some("llama3".into()),
            temperature: None,
            max_tokens: None,
            local_url: Some("http://ollama:11434".into()),
        };
        let config = local.into_domain();
        assert_eq!(config.local_model.as_deref(), Some("llama3"));
        assert_eq!(config.local_url, "http://ollama:11434");
        // Hosted defaults stay untouched.
        assert_eq!(config.hosted_model, "grok-2");
    }

    #[test]
    fn provider_request_omitted_fields_take_defaults() {
        let json = r#"{"provider_kind": "hosted", "api_key": "sk-test"}"#;
        let req: ProviderConfigRequest = serde_json::from_str(json).unwrap();
        let config = req.into_domain();
        assert_eq!(config.hosted_temperature, 0.7);
        assert_eq!(config.hosted_max_tokens, 2000);
        assert_eq!(config.local_url, "http://localhost:11434");
    }

    #[test]
    fn tracker_response_masks_the_token() {
        let config = TrackerConfig::new("team.atlassian.net", "qa@team.dev", "secret-token");
        let response = TrackerConfigResponse::from(config);
        assert!(response.api_token_set);
        let json = serde_json::to_string(&response).unwrap();
        assert!(!json.contains("secret-token"));
    }

    #[test]
    fn provider_response_masks_the_key() {
        let response = ProviderConfigResponse::from(ProviderConfig::hosted("sk-secret"));
        assert!(response.api_key_set);
        let json = serde_json::to_string(&response).unwrap();
        assert!(!json.contains("sk-secret"));
    }

    #[test]
    fn export_links_address_all_three_formats() {
        let links = ExportLinks::for_id("abc");
        assert_eq!(links.markdown, "/api/export/abc/md");
        assert_eq!(links.pdf, "/api/export/abc/pdf");
        assert_eq!(links.docx, "/api/export/abc/docx");
    }

    #[test]
    fn generate_request_deserializes_with_optional_fields_absent() {
        let json = r#"{"issue_key": "PROJ-1", "summary": "A bug"}"#;
        let req: GenerateRequest = serde_json::from_str(json).unwrap();
        let issue = req.into_issue();
        assert_eq!(issue.key, "PROJ-1");
        assert_eq!(issue.description, None);
    }
}
