//! Hosted chat-completion provider.
//!
//! Talks to an OpenAI-compatible chat-completions endpoint with Bearer-token
//! auth. Connection tests send a minimal completion (≤10 tokens, 10s
//! timeout); generation sends the configured temperature and token budget
//! with a 30s timeout.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::ProviderConfig;
use crate::ports::{ConnectionReport, LlmProvider, ProviderError};

const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
const TEST_TIMEOUT: Duration = Duration::from_secs(10);
const GENERATE_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the hosted provider.
#[derive(Debug, Clone)]
pub struct HostedConfig {
    api_key: Secret<String>,
    pub model: String,
    pub base_url: String,
    pub temperature: f64,
    pub max_tokens: i32,
}

impl HostedConfig {
    /// Creates a configuration with the given API key and field defaults.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "grok-2".to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            temperature: 0.7,
            max_tokens: 2000,
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL (for OpenAI-compatible endpoints).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

impl TryFrom<&ProviderConfig> for HostedConfig {
    type Error = ProviderError;

    fn try_from(config: &ProviderConfig) -> Result<Self, Self::Error> {
        let api_key = config
            .hosted_api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| ProviderError::missing_credential("hosted API key not provided"))?;

        Ok(Self {
            api_key: Secret::new(api_key.to_string()),
            model: config.hosted_model.clone(),
            base_url: DEFAULT_BASE_URL.to_string(),
            temperature: config.hosted_temperature,
            max_tokens: config.hosted_max_tokens,
        })
    }
}

/// Hosted chat-completion provider implementation.
pub struct HostedProvider {
    config: HostedConfig,
    client: Client,
}

impl HostedProvider {
    pub fn new(config: HostedConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }

    async fn post_completion(
        &self,
        request: &ChatRequest,
        timeout: Duration,
    ) -> Result<reqwest::Response, ProviderError> {
        self.client
            .post(self.completions_url())
            .header("Authorization", format!("Bearer {}", self.config.api_key()))
            .header("Content-Type", "application/json")
            .timeout(timeout)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout {
                        timeout_secs: timeout.as_secs(),
                    }
                } else if e.is_connect() {
                    ProviderError::connection(format!("connection failed: {e}"))
                } else {
                    ProviderError::connection(e.to_string())
                }
            })
    }
}

#[async_trait]
impl LlmProvider for HostedProvider {
    async fn test_connection(&self) -> ConnectionReport {
        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![ChatMessage::user("Hello")],
            temperature: None,
            max_tokens: 10,
        };

        match self.post_completion(&request, TEST_TIMEOUT).await {
            // Exactly 200 counts as connected; other statuses carry detail.
            Ok(response) if response.status() == StatusCode::OK => ConnectionReport::connected(
                format!("Hosted provider connection successful ({})", self.config.model),
            ),
            Ok(response) => {
                let status = response.status();
                ConnectionReport::failed(
                    "Hosted provider connection failed. Check API key.",
                    format!("HTTP {status}"),
                )
            }
            Err(err) => {
                ConnectionReport::failed("Hosted provider unreachable", err.to_string())
            }
        }
    }

    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![ChatMessage::user(prompt)],
            temperature: Some(self.config.temperature),
            max_tokens: self.config.max_tokens,
        };

        let response = self.post_completion(&request, GENERATE_TIMEOUT).await?;
        let status = response.status();

        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, "hosted provider generation failed");
            return Err(ProviderError::remote(status.as_u16(), truncate(&body, 500)));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::parse(format!("invalid completion body: {e}")))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| ProviderError::parse("no choices in response"))
    }

    fn name(&self) -> &str {
        "hosted"
    }
}

/// Truncation for error bodies carried in error values.
fn truncate(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    max_tokens: i32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

impl ChatMessage {
    fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user",
            content: content.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_from_provider_config_requires_key() {
        let mut config = ProviderConfig::hosted("secret");
        assert!(HostedConfig::try_from(&config).is_ok());

        config.hosted_api_key = Some(String::new());
        assert!(HostedConfig::try_from(&config).is_err());

        config.hosted_api_key = None;
        assert!(HostedConfig::try_from(&config).is_err());
    }

    #[test]
    fn config_carries_generation_parameters() {
        let mut source = ProviderConfig::hosted("secret");
        source.hosted_model = "grok-3".to_string();
        source.hosted_temperature = 0.2;
        source.hosted_max_tokens = 512;

        let config = HostedConfig::try_from(&source).unwrap();
        assert_eq!(config.model, "grok-3");
        assert_eq!(config.temperature, 0.2);
        assert_eq!(config.max_tokens, 512);
    }

    #[test]
    fn chat_request_serializes_without_null_temperature() {
        let request = ChatRequest {
            model: "grok-2".to_string(),
            messages: vec![ChatMessage::user("Hello")],
            temperature: None,
            max_tokens: 10,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("temperature").is_none());
        assert_eq!(json["max_tokens"], 10);
        assert_eq!(json["messages"][0]["role"], "user");
    }

    #[test]
    fn chat_response_extracts_first_choice() {
        let body = r##"{"choices":[{"message":{"role":"assistant","content":"# Plan"}}]}"##;
        let parsed: ChatResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.choices[0].message.content, "# Plan");
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
        let addr = stub_server(b"HTTP/1.1 201 Created\r\ncontent-length: 0\r\n\r\n").await;
        let provider = HostedProvider::new(
            HostedConfig::new("test-key").with_base_url(format!("http://{addr}")),
        );

        let report = provider.test_connection().await;
        assert!(!report.is_connected());
        assert_eq!(report.error.as_deref(), Some("HTTP 201 Created"));
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("héllo", 2), "hé");
        assert_eq!(truncate("abc", 10), "abc");
    }
}
