//! Error translation at the HTTP boundary.
//!
//! Every typed failure from the ports and the application maps to exactly
//! one status code: missing configuration and bad input are 400, unknown
//! ids 404, upstream collaborator failures 502, absent build capabilities
//! 503, persistence failures 500.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::dto::ErrorResponse;
use crate::application::GenerationError;
use crate::ports::{ExportError, StoreError, TrackerError};

/// API-level failure, convertible straight into a response.
#[derive(Debug)]
pub enum ApiError {
    /// A required configuration row has not been saved yet.
    NotConfigured(&'static str),
    BadRequest(String),
    NotFound(String),
    /// The issue tracker failed or rejected the call.
    Tracker(TrackerError),
    /// The language-model provider failed during generation.
    Provider(String),
    /// Export capability absent in this build.
    ExportUnavailable(String),
    /// The export renderer itself failed.
    ExportFailed(String),
    Store(StoreError),
}

impl ApiError {
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    fn status_and_body(&self) -> (StatusCode, ErrorResponse) {
        match self {
            ApiError::NotConfigured(what) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("NOT_CONFIGURED", format!("{what} is not configured")),
            ),
            ApiError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("BAD_REQUEST", message.clone()),
            ),
            ApiError::NotFound(what) => (
                StatusCode::NOT_FOUND,
                ErrorResponse::new("NOT_FOUND", format!("{what} not found")),
            ),
            ApiError::Tracker(TrackerError::IssueNotFound(key)) => (
                StatusCode::NOT_FOUND,
                ErrorResponse::new("NOT_FOUND", format!("issue {key} not found")),
            ),
            ApiError::Tracker(err) => (
                StatusCode::BAD_GATEWAY,
                ErrorResponse::new("TRACKER_ERROR", err.to_string()),
            ),
            ApiError::Provider(message) => (
                StatusCode::BAD_GATEWAY,
                ErrorResponse::new("PROVIDER_ERROR", message.clone()),
            ),
            ApiError::ExportUnavailable(message) => (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorResponse::new("EXPORT_UNAVAILABLE", message.clone()),
            ),
            ApiError::ExportFailed(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new("EXPORT_FAILED", message.clone()),
            ),
            ApiError::Store(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new("STORE_ERROR", err.to_string()),
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        if status.is_server_error() {
            tracing::error!(status = %status, code = body.code, message = %body.message, "request failed");
        } else {
            tracing::debug!(status = %status, code = body.code, message = %body.message, "request rejected");
        }
        (status, Json(body)).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}

impl From<TrackerError> for ApiError {
    fn from(err: TrackerError) -> Self {
        Self::Tracker(err)
    }
}

impl From<GenerationError> for ApiError {
    fn from(err: GenerationError) -> Self {
        match err {
            GenerationError::ProviderNotConfigured => {
                Self::NotConfigured("language-model provider")
            }
            GenerationError::Provider(e) => Self::Provider(e.to_string()),
            GenerationError::Store(e) => Self::Store(e),
        }
    }
}

impl From<ExportError> for ApiError {
    fn from(err: ExportError) -> Self {
        match err {
            ExportError::UnsupportedFormat(format) => {
                Self::BadRequest(format!("unsupported export format: {format}"))
            }
            ExportError::Unavailable(reason) => Self::ExportUnavailable(reason),
            ExportError::RenderFailed(reason) => Self::ExportFailed(reason),
        }
    }
}
