//! Language-model provider adapters.
//!
//! Two real backends (hosted chat-completion API, local model server) plus a
//! configurable mock for tests. [`HttpProviderFactory`] selects the variant
//! from stored configuration with an exhaustive match over
//! [`ProviderKind`](crate::domain::ProviderKind).

mod hosted;
mod local;
mod mock;

pub use hosted::{HostedConfig, HostedProvider};
pub use local::{LocalConfig, LocalProvider};
pub use mock::{MockProvider, MockProviderFactory, MockReply};

use crate::domain::{ProviderConfig, ProviderKind};
use crate::ports::{LlmProvider, ProviderError, ProviderFactory};

/// Builds real HTTP-backed providers from stored configuration.
#[derive(Debug, Clone, Default)]
pub struct HttpProviderFactory;

impl HttpProviderFactory {
    pub fn new() -> Self {
        Self
    }
}

impl ProviderFactory for HttpProviderFactory {
    fn create(&self, config: &ProviderConfig) -> Result<Box<dyn LlmProvider>, ProviderError> {
        match config.provider_kind {
            ProviderKind::Hosted => {
                let hosted = HostedProvider::new(HostedConfig::try_from(config)?);
                Ok(Box::new(hosted))
            }
            ProviderKind::Local => {
                let local = LocalProvider::new(LocalConfig::from(config));
                Ok(Box::new(local))
            }
        }
    }
}
