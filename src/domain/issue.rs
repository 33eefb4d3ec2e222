//! Work item details pulled from the issue tracker.

use serde::{Deserialize, Serialize};

/// The tracker fields that feed the generation prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueDetails {
    /// Issue key, e.g. `PROJ-123`.
    pub key: String,
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

impl IssueDetails {
    pub fn new(key: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            summary: summary.into(),
            description: None,
            acceptance_criteria: None,
            priority: None,
            issue_type: None,
        }
    }
}
