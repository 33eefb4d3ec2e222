//! Issue Tracker Port - Work item lookup and connection testing.

use async_trait::async_trait;
use thiserror::Error;

use super::ConnectionReport;
use crate::domain::{IssueDetails, TrackerConfig};

/// Port for the external issue tracker.
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Authenticated reachability probe (current-user endpoint).
    async fn test_connection(&self) -> ConnectionReport;

    /// Fetch one issue by key with the fields the prompt needs.
    async fn fetch_issue(&self, key: &str) -> Result<IssueDetails, TrackerError>;
}

/// Builds a tracker client from stored configuration.
///
/// Like providers, tracker clients are constructed per call and hold no
/// shared mutable state.
pub trait TrackerFactory: Send + Sync {
    fn create(&self, config: &TrackerConfig) -> Box<dyn IssueTracker>;
}

/// Errors from issue tracker operations.
#[derive(Debug, Clone, Error)]
pub enum TrackerError {
    /// The tracker host could not be reached.
    #[error("tracker connection error: {0}")]
    Connection(String),

    /// The tracker answered with a non-2xx status.
    #[error("tracker returned HTTP {status}: {message}")]
    Remote { status: u16, message: String },

    /// The requested issue does not exist (or is not visible).
    #[error("issue {0} not found")]
    IssueNotFound(String),

    /// The tracker answered 2xx but the body was not usable.
    #[error("tracker response could not be parsed: {0}")]
    Parse(String),
}

impl TrackerError {
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
