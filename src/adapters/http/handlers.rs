//! HTTP handlers.

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;

use super::dto::{
    ConnectionTestResponse, GenerateRequest, GenerationResponse, GenerationSummary,
    HealthResponse, HistoryQuery, ProviderConfigRequest, ProviderConfigResponse,
    TemplateConfigRequest, TemplateConfigResponse, TemplateSaveResponse, TrackerConfigRequest,
    TrackerConfigResponse,
};
use super::error::ApiError;
use super::state::AppState;
use crate::adapters::template::FileTemplateSource;
use crate::domain::{GenerationId, TemplateConfig};
use crate::ports::{ConnectionReport, ExportFormat};

// ════════════════════════════════════════════════════════════════════════════
// Health
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    // A read against the settings store doubles as the database probe.
    let database = match state.settings.load_tracker().await {
        Ok(_) => "ok",
        Err(_) => "error",
    };
    Json(HealthResponse {
        status: "ok",
        database,
        pdf_export: state.exporter.capability(ExportFormat::Pdf),
        docx_export: state.exporter.capability(ExportFormat::Docx),
        pdf_templates: FileTemplateSource::pdf_capability(),
    })
}

// ════════════════════════════════════════════════════════════════════════════
// Tracker configuration
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/config/tracker
pub async fn save_tracker(
    State(state): State<AppState>,
    Json(req): Json<TrackerConfigRequest>,
) -> Result<Json<TrackerConfigResponse>, ApiError> {
    if req.domain.trim().is_empty() || req.email.trim().is_empty() {
        return Err(ApiError::bad_request("domain and email are required"));
    }
    let config = req.into_domain();
    state.settings.save_tracker(&config).await?;
    Ok(Json(config.into()))
}

/// GET /api/config/tracker
pub async fn get_tracker(
    State(state): State<AppState>,
) -> Result<Json<TrackerConfigResponse>, ApiError> {
    let config = state
        .settings
        .load_tracker()
        .await?
        .ok_or(ApiError::NotConfigured("issue tracker"))?;
    Ok(Json(config.into()))
}

/// POST /api/config/tracker/test
///
/// Runs against the stored credential and persists the outcome, successful
/// or not, along with the test timestamp.
pub async fn test_tracker(
    State(state): State<AppState>,
) -> Result<Json<ConnectionTestResponse>, ApiError> {
    let config = state
        .settings
        .load_tracker()
        .await?
        .ok_or(ApiError::NotConfigured("issue tracker"))?;

    let report = state.trackers.create(&config).test_connection().await;
    let tested_at = Utc::now();
    state
        .settings
        .record_tracker_test(report.status, tested_at)
        .await?;

    Ok(Json(ConnectionTestResponse { report, tested_at }))
}

// ════════════════════════════════════════════════════════════════════════════
// Provider configuration
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/config/provider
pub async fn save_provider(
    State(state): State<AppState>,
    Json(req): Json<ProviderConfigRequest>,
) -> Result<Json<ProviderConfigResponse>, ApiError> {
    let config = req.into_domain();
    state.settings.save_provider(&config).await?;
    Ok(Json(config.into()))
}

/// GET /api/config/provider
pub async fn get_provider(
    State(state): State<AppState>,
) -> Result<Json<ProviderConfigResponse>, ApiError> {
    let config = state
        .settings
        .load_provider()
        .await?
        .ok_or(ApiError::NotConfigured("language-model provider"))?;
    Ok(Json(config.into()))
}

/// POST /api/config/provider/test
///
/// Like the tracker test: stored config, persisted outcome. A provider
/// that cannot even be constructed (missing API key) reports as a failed
/// test rather than an error.
pub async fn test_provider(
    State(state): State<AppState>,
) -> Result<Json<ConnectionTestResponse>, ApiError> {
    let config = state
        .settings
        .load_provider()
        .await?
        .ok_or(ApiError::NotConfigured("language-model provider"))?;

    let report = match state.providers.create(&config) {
        Ok(provider) => provider.test_connection().await,
        Err(e) => ConnectionReport::failed("Provider configuration is incomplete", e.to_string()),
    };
    let tested_at = Utc::now();
    state
        .settings
        .record_provider_test(report.status, tested_at)
        .await?;

    Ok(Json(ConnectionTestResponse { report, tested_at }))
}

// ════════════════════════════════════════════════════════════════════════════
// Template configuration
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/config/template
///
/// Validates the file and stores the outcome with the path; a failed
/// validation still saves (the status records the problem).
pub async fn save_template(
    State(state): State<AppState>,
    Json(req): Json<TemplateConfigRequest>,
) -> Result<Json<TemplateSaveResponse>, ApiError> {
    if req.file_path.trim().is_empty() {
        return Err(ApiError::bad_request("file_path is required"));
    }

    let report = state.templates.validate(&req.file_path).await;
    let config = TemplateConfig {
        file_path: req.file_path,
        file_format: report.format,
        validation_status: report.status,
    };
    state.settings.save_template(&config).await?;

    Ok(Json(TemplateSaveResponse {
        config: config.into(),
        validation: report,
    }))
}

/// GET /api/config/template
pub async fn get_template(
    State(state): State<AppState>,
) -> Result<Json<TemplateConfigResponse>, ApiError> {
    let config = state
        .settings
        .load_template()
        .await?
        .ok_or(ApiError::NotConfigured("template"))?;
    Ok(Json(config.into()))
}

// ════════════════════════════════════════════════════════════════════════════
// Issues
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/issues/:key
pub async fn get_issue(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Response, ApiError> {
    let config = state
        .settings
        .load_tracker()
        .await?
        .ok_or(ApiError::NotConfigured("issue tracker"))?;

    let issue = state.trackers.create(&config).fetch_issue(&key).await?;
    Ok(Json(issue).into_response())
}

// ════════════════════════════════════════════════════════════════════════════
// Generation and history
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/generate
pub async fn generate(
    State(state): State<AppState>,
    Json(req): Json<GenerateRequest>,
) -> Result<(StatusCode, Json<GenerationResponse>), ApiError> {
    if req.issue_key.trim().is_empty() || req.summary.trim().is_empty() {
        return Err(ApiError::bad_request("issue_key and summary are required"));
    }
    let issue = req.into_issue();
    let record = state.generation.generate(&issue).await?;
    Ok((StatusCode::CREATED, Json(record.into())))
}

/// Largest history page a single request may ask for.
const MAX_HISTORY_LIMIT: u32 = 100;

fn effective_limit(requested: u32) -> u32 {
    requested.min(MAX_HISTORY_LIMIT)
}

/// GET /api/generations
pub async fn list_generations(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<GenerationSummary>>, ApiError> {
    let records = state
        .generations
        .list_recent(effective_limit(query.limit))
        .await?;
    Ok(Json(records.into_iter().map(Into::into).collect()))
}

// ════════════════════════════════════════════════════════════════════════════
// Export
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/export/:id/:format
///
/// The same stored Markdown feeds every format; an id unknown to the store
/// is 404 regardless of which format was asked for.
pub async fn export(
    State(state): State<AppState>,
    Path((id, format)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    let format: ExportFormat = format.parse()?;
    let id: GenerationId = id
        .parse()
        .map_err(|_| ApiError::not_found(format!("generation {id}")))?;

    let record = state
        .generations
        .fetch(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("generation {id}")))?;

    let body = match format {
        ExportFormat::Markdown => record.generated_content.clone().into_bytes(),
        ExportFormat::Pdf => state.exporter.to_pdf(&record.generated_content).await?,
        ExportFormat::Docx => state.exporter.to_docx(&record.generated_content).await?,
    };

    let filename = format!(
        "test-plan-{}.{}",
        record.source_issue_id,
        format.extension()
    );
    let headers = [
        (header::CONTENT_TYPE, format.content_type().to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        ),
    ];
    Ok((headers, body).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_limit_is_capped() {
        assert_eq!(effective_limit(0), 0);
        assert_eq!(effective_limit(20), 20);
        assert_eq!(effective_limit(MAX_HISTORY_LIMIT), MAX_HISTORY_LIMIT);
        assert_eq!(effective_limit(u32::MAX), MAX_HISTORY_LIMIT);
    }
}
