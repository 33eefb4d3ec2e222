//! Local model-server provider.
//!
//! Talks to an Ollama-style API on the local network. Connection tests list
//! the installed models (5s timeout); generation posts a non-streaming
//! request with a long timeout, since local inference can take minutes.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::ProviderConfig;
use crate::ports::{ConnectionReport, LlmProvider, ProviderError};

const DEFAULT_MODEL: &str = "mistral";
const TEST_TIMEOUT: Duration = Duration::from_secs(5);
const GENERATE_TIMEOUT: Duration = Duration::from_secs(120);

/// Configuration for the local provider.
#[derive(Debug, Clone)]
pub struct LocalConfig {
    pub base_url: String,
    pub model: String,
    pub temperature: f64,
}

impl LocalConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.7,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

impl From<&ProviderConfig> for LocalConfig {
    fn from(config: &ProviderConfig) -> Self {
        Self {
            base_url: config.local_url.clone(),
            model: config
                .local_model
                .clone()
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            temperature: config.hosted_temperature,
        }
    }
}

/// Local model-server provider implementation.
pub struct LocalProvider {
    config: LocalConfig,
    client: Client,
}

impl LocalProvider {
    pub fn new(config: LocalConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }
}

#[async_trait]
impl LlmProvider for LocalProvider {
    async fn test_connection(&self) -> ConnectionReport {
        let url = format!("{}/api/tags", self.config.base_url);

        let response = match self.client.get(&url).timeout(TEST_TIMEOUT).send().await {
            Ok(response) => response,
            Err(e) if e.is_connect() => {
                // Service not running is the common case; call it out.
                return ConnectionReport::failed(
                    "Cannot connect to the local model server. Is it running?",
                    "connection refused",
                );
            }
            Err(e) => {
                return ConnectionReport::failed("Local model server unreachable", e.to_string());
            }
        };

        // Exactly 200 counts as connected.
        if response.status() != StatusCode::OK {
            return ConnectionReport::failed(
                "Local model server not responding",
                format!("HTTP {}", response.status()),
            );
        }

        match response.json::<TagsResponse>().await {
            Ok(tags) => {
                let models: Vec<String> = tags.models.into_iter().map(|m| m.name).collect();
                ConnectionReport::connected(format!(
                    "Local model server connected ({} models available)",
                    models.len()
                ))
                .with_models(models)
            }
            Err(e) => ConnectionReport::failed(
                "Local model server sent an unexpected response",
                e.to_string(),
            ),
        }
    }

    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        let url = format!("{}/api/generate", self.config.base_url);
        let request = GenerateRequest {
            model: self.config.model.clone(),
            prompt,
            temperature: self.config.temperature,
            stream: false,
        };

        let response = self
            .client
            .post(&url)
            .timeout(GENERATE_TIMEOUT)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout {
                        timeout_secs: GENERATE_TIMEOUT.as_secs(),
                    }
                } else if e.is_connect() {
                    ProviderError::connection("connection refused")
                } else {
                    ProviderError::connection(e.to_string())
                }
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            tracing::error!(status = %status, "local provider generation failed");
            return Err(ProviderError::remote(status.as_u16(), "generation failed"));
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::parse(format!("invalid generate body: {e}")))?;

        Ok(parsed.response)
    }

    fn name(&self) -> &str {
        "local"
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: String,
    prompt: &'a str,
    temperature: f64,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<TagModel>,
}

#[derive(Debug, Deserialize)]
struct TagModel {
    #[serde(default)]
    name: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_falls_back_to_default_model() {
        let mut source = ProviderConfig::local("");
        source.local_model = None;
        assert_eq!(LocalConfig::from(&source).model, DEFAULT_MODEL);

        source.local_model = Some(String::new());
        assert_eq!(LocalConfig::from(&source).model, DEFAULT_MODEL);

        source.local_model = Some("llama3".to_string());
        assert_eq!(LocalConfig::from(&source).model, "llama3");
    }

    #[test]
    fn generate_request_is_non_streaming() {
        let request = GenerateRequest {
            model: "mistral".to_string(),
            prompt: "hello",
            temperature: 0.7,
            stream: false,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["stream"], false);
        assert_eq!(json["prompt"], "hello");
    }

    /// Serves exactly one connection with a canned HTTP response.
    async fn stub_server(response: &'static [u8]) -> std::net::SocketAddr {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let _ = socket.write_all(response).await;
        });
        addr
    }

    #[tokio::test]
    async fn non_200_success_status_is_not_connected() {
        let addr =
            stub_server(b"HTTP/1.1 204 No Content\r\ncontent-length: 0\r\n\r\n").await;
        let provider = LocalProvider::new(LocalConfig::new(format!("http://{addr}")));

        let report = provider.test_connection().await;
        assert!(!report.is_connected());
        assert_eq!(report.error.as_deref(), Some("HTTP 204 No Content"));
    }

    #[test]
    fn tags_response_tolerates_missing_fields() {
        let parsed: TagsResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.models.is_empty());

        let parsed: TagsResponse =
            serde_json::from_str(r#"{"models":[{"name":"mistral:latest"},{}]}"#).unwrap();
        assert_eq!(parsed.models[0].name, "mistral:latest");
        assert_eq!(parsed.models[1].name, "");
    }
}
