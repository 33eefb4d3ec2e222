//! Issue tracker adapter.

mod jira;

pub use jira::JiraClient;

use crate::domain::TrackerConfig;
use crate::ports::{IssueTracker, TrackerFactory};

/// Builds real Jira clients from stored configuration.
#[derive(Debug, Clone, Default)]
pub struct HttpTrackerFactory;

impl HttpTrackerFactory {
    pub fn new() -> Self {
        Self
    }
}

impl TrackerFactory for HttpTrackerFactory {
    fn create(&self, config: &TrackerConfig) -> Box<dyn IssueTracker> {
        Box::new(JiraClient::from_config(config))
    }
}
