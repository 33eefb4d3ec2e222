//! Jira REST client.
//!
//! Basic auth (email + API token), current-user endpoint for connection
//! tests, issue-by-key with field selection for prompt input. Rich-text
//! (ADF) descriptions are flattened to plain text by concatenating each
//! content block's text.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde_json::Value;
use std::time::Duration;

use crate::domain::{IssueDetails, TrackerConfig};
use crate::ports::{ConnectionReport, IssueTracker, TrackerError};

const TEST_TIMEOUT: Duration = Duration::from_secs(5);
const FETCH_TIMEOUT: Duration = Duration::from_secs(15);
const ISSUE_FIELDS: &str = "key,summary,description,priority,issuetype";

/// Jira REST API client.
pub struct JiraClient {
    domain: String,
    email: String,
    api_token: Secret<String>,
    client: Client,
}

impl JiraClient {
    pub fn new(
        domain: impl Into<String>,
        email: impl Into<String>,
        api_token: impl Into<String>,
    ) -> Self {
        Self {
            domain: domain.into(),
            email: email.into(),
            api_token: Secret::new(api_token.into()),
            client: Client::new(),
        }
    }

    /// Builds a client from stored tracker configuration.
    pub fn from_config(config: &TrackerConfig) -> Self {
        Self::new(&config.domain, &config.email, &config.api_token)
    }

    fn base_url(&self) -> String {
        format!("https://{}/rest/api/3", self.domain)
    }

    fn get(&self, url: String, timeout: Duration) -> reqwest::RequestBuilder {
        self.client
            .get(url)
            .basic_auth(&self.email, Some(self.api_token.expose_secret()))
            .header("Accept", "application/json")
            .timeout(timeout)
    }
}

#[async_trait]
impl IssueTracker for JiraClient {
    async fn test_connection(&self) -> ConnectionReport {
        let url = format!("{}/myself", self.base_url());

        let response = match self.get(url, TEST_TIMEOUT).send().await {
            Ok(response) => response,
            Err(e) if e.is_connect() => {
                return ConnectionReport::failed(
                    "Cannot reach tracker domain. Check the URL.",
                    "connection refused",
                );
            }
            Err(e) => return ConnectionReport::failed("Tracker unreachable", e.to_string()),
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return ConnectionReport::failed(
                "Tracker connection failed",
                format!("HTTP {}: {}", status, body),
            );
        }

        let display_name = response
            .json::<Value>()
            .await
            .ok()
            .and_then(|user| user.get("displayName")?.as_str().map(str::to_string))
            .unwrap_or_else(|| "Unknown".to_string());

        ConnectionReport::connected(format!("Tracker connection successful ({display_name})"))
    }

    async fn fetch_issue(&self, key: &str) -> Result<IssueDetails, TrackerError> {
        let url = format!("{}/issue/{}", self.base_url(), key);

        let response = self
            .get(url, FETCH_TIMEOUT)
            .query(&[("fields", ISSUE_FIELDS)])
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    TrackerError::connection("connection refused")
                } else {
                    TrackerError::connection(e.to_string())
                }
            })?;

        let status = response.status();
        if status.as_u16() == 404 {
            return Err(TrackerError::IssueNotFound(key.to_string()));
        }
        if !status.is_success() {
            tracing::error!(status = %status, issue = key, "issue fetch failed");
            return Err(TrackerError::remote(status.as_u16(), "issue fetch failed"));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| TrackerError::parse(e.to_string()))?;

        parse_issue(&body).ok_or_else(|| TrackerError::parse("issue body missing key or fields"))
    }
}

fn parse_issue(body: &Value) -> Option<IssueDetails> {
    let key = body.get("key")?.as_str()?.to_string();
    let fields = body.get("fields")?;

    let summary = fields
        .get("summary")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let description = fields.get("description").and_then(flatten_rich_text);

    Some(IssueDetails {
        key,
        summary,
        // Jira keeps acceptance criteria inside the description unless a
        // custom field is configured; reuse the flattened description.
        acceptance_criteria: description.clone(),
        description,
        priority: nested_name(fields, "priority"),
        issue_type: nested_name(fields, "issuetype"),
    })
}

fn nested_name(fields: &Value, field: &str) -> Option<String> {
    fields
        .get(field)?
        .get("name")?
        .as_str()
        .map(str::to_string)
}

/// Flattens a description value to plain text.
///
/// Plain strings pass through; rich-text (ADF) documents are flattened by
/// joining the text of each top-level content block with newlines.
fn flatten_rich_text(value: &Value) -> Option<String> {
    if let Some(text) = value.as_str() {
        return Some(text.to_string());
    }

    let blocks = value.get("content")?.as_array()?;
    let mut lines = Vec::with_capacity(blocks.len());
    for block in blocks {
        lines.push(block_text(block));
    }
    Some(lines.join("\n"))
}

/// Concatenated text of one content block's inline nodes.
fn block_text(block: &Value) -> String {
    let mut out = String::new();
    if let Some(text) = block.get("text").and_then(Value::as_str) {
        out.push_str(text);
    }
    if let Some(children) = block.get("content").and_then(Value::as_array) {
        for child in children {
            out.push_str(&block_text(child));
        }
    }
    out
}
