//! LLM Provider Port - Interface for language-model backends.
//!
//! Two unrelated backends hide behind this contract: a hosted
//! chat-completion API and a locally reachable model server. The caller
//! stays agnostic; selection happens in a [`ProviderFactory`] keyed by the
//! stored [`ProviderKind`](crate::domain::ProviderKind).
//!
//! # Failure model
//!
//! `test_connection` never returns `Err`: reachability problems are part of
//! its answer, so they arrive as a `failed` [`ConnectionReport`]. `generate`
//! returns a typed [`ProviderError`] — the request-handling boundary above
//! this port must stay responsive when a backend is down, so nothing here
//! panics or escapes untagged.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::domain::{ConnectionStatus, ProviderConfig};

/// Port for language-model provider interactions.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Cheap reachability/authentication probe (short timeout, minimal
    /// request). Always resolves to a report, never an error.
    async fn test_connection(&self) -> ConnectionReport;

    /// One synchronous completion for the given prompt.
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError>;

    /// Name used for attribution on stored generation records.
    fn name(&self) -> &str;
}

/// Builds a provider instance from stored configuration.
///
/// A fresh instance per call: providers hold no shared mutable state.
pub trait ProviderFactory: Send + Sync {
    fn create(&self, config: &ProviderConfig) -> Result<Box<dyn LlmProvider>, ProviderError>;
}

/// Outcome of a connection test.
#[derive(Debug, Clone, Serialize)]
pub struct ConnectionReport {
    pub status: ConnectionStatus,
    /// Short human-readable summary, distinct from any raw error text.
    pub message: String,
    /// Raw error detail when the test failed (HTTP status, exception text).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Model names enumerated by the backend, when the test lists them.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub available_models: Vec<String>,
}

impl ConnectionReport {
    pub fn connected(message: impl Into<String>) -> Self {
        Self {
            status: ConnectionStatus::Connected,
            message: message.into(),
            error: None,
            available_models: Vec::new(),
        }
    }

    pub fn failed(message: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            status: ConnectionStatus::Failed,
            message: message.into(),
            error: Some(error.into()),
            available_models: Vec::new(),
        }
    }

    pub fn with_models(mut self, models: Vec<String>) -> Self {
        self.available_models = models;
        self
    }

    pub fn is_connected(&self) -> bool {
        self.status == ConnectionStatus::Connected
    }
}

/// Errors from provider construction or generation.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    /// A required credential or field is missing from the configuration.
    #[error("provider configuration error: {0}")]
    MissingCredential(String),

    /// The backend could not be reached (refused, DNS, transport).
    #[error("provider connection error: {0}")]
    Connection(String),

    /// The call exceeded its timeout.
    #[error("provider request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// The backend answered with a non-2xx status.
    #[error("provider returned HTTP {status}: {message}")]
    Remote { status: u16, message: String },

    /// The backend answered 2xx but the body was not usable.
    #[error("provider response could not be parsed: {0}")]
    Parse(String),
}

impl ProviderError {
    pub fn missing_credential(field: impl Into<String>) -> Self {
        Self::MissingCredential(field.into())
    }

    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    pub fn remote(status: u16, message: impl Into<String>) -> Self {
        Self::Remote {
            status,
            message: message.into(),
        }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_report_constructors_set_status() {
        let ok = ConnectionReport::connected("reachable");
        assert!(ok.is_connected());
        assert!(ok.error.is_none());

        let bad = ConnectionReport::failed("unreachable", "connection refused");
        assert_eq!(bad.status, ConnectionStatus::Failed);
        assert_eq!(bad.error.as_deref(), Some("connection refused"));
    }

    #[test]
    fn provider_error_messages_carry_detail() {
        let err = ProviderError::remote(503, "overloaded");
        assert!(err.to_string().contains("503"));
        assert!(err.to_string().contains("overloaded"));

        let err = ProviderError::Timeout { timeout_secs: 30 };
        assert!(err.to_string().contains("30"));
    }

    #[test]
    fn llm_provider_is_object_safe() {
        fn check<T: LlmProvider + ?Sized>() {}
        check::<dyn LlmProvider>();
    }
}
