//! Mock provider for testing.
//!
//! Returns pre-configured replies in order and records every prompt it was
//! asked to generate for, so tests can run without network access.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::domain::ProviderConfig;
use crate::ports::{ConnectionReport, LlmProvider, ProviderError, ProviderFactory};

/// A configured mock reply.
#[derive(Debug, Clone)]
pub enum MockReply {
    Success(String),
    Failure(ProviderError),
}

/// Mock provider with scripted replies and call capture.
#[derive(Debug, Clone, Default)]
pub struct MockProvider {
    replies: Arc<Mutex<VecDeque<MockReply>>>,
    prompts: Arc<Mutex<Vec<String>>>,
    connected: bool,
}

impl MockProvider {
    pub fn new() -> Self {
        Self {
            replies: Arc::new(Mutex::new(VecDeque::new())),
            prompts: Arc::new(Mutex::new(Vec::new())),
            connected: true,
        }
    }

    /// Queue a successful generation reply.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(MockReply::Success(content.into()));
        self
    }

    /// Queue a generation failure.
    pub fn with_failure(self, error: ProviderError) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(MockReply::Failure(error));
        self
    }

    /// Make `test_connection` report failure.
    pub fn disconnected(mut self) -> Self {
        self.connected = false;
        self
    }

    /// Prompts passed to `generate`, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    async fn test_connection(&self) -> ConnectionReport {
        if self.connected {
            ConnectionReport::connected("mock provider ready")
        } else {
            ConnectionReport::failed("mock provider down", "scripted failure")
        }
    }

    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        self.prompts.lock().unwrap().push(prompt.to_string());

        match self.replies.lock().unwrap().pop_front() {
            Some(MockReply::Success(content)) => Ok(content),
            Some(MockReply::Failure(error)) => Err(error),
            None => Ok("mock generation".to_string()),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// Factory handing out clones of one mock instance, so tests keep a handle
/// to the captured prompts.
#[derive(Debug, Clone)]
pub struct MockProviderFactory(pub MockProvider);

impl ProviderFactory for MockProviderFactory {
    fn create(&self, _config: &ProviderConfig) -> Result<Box<dyn LlmProvider>, ProviderError> {
        Ok(Box::new(self.0.clone()))
    }
}
