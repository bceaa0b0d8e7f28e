//! The provider contract and selection of the active backend.

use std::fmt;

use async_trait::async_trait;
use tracing::debug;

use crate::config::{Backend, Config};
use crate::error::{ProviderError, SuggestError};
use crate::llm::claude::ClaudeProvider;
use crate::llm::openai::OpenAiProvider;

/// A backend able to suggest a commit message for a diff.
#[async_trait]
pub trait CommitMessageProvider: fmt::Debug + Send + Sync {
    fn backend(&self) -> Backend;

    fn model(&self) -> &str;

    /// Make one request to the backend and return its suggestion verbatim.
    ///
    /// An empty `diff` fails with [`SuggestError::EmptyDiff`] before any
    /// network traffic.
    async fn suggest(&self, diff: &str) -> Result<String, SuggestError>;
}

/// Build the provider for the configured active backend.
///
/// Checks, in order, that the backend has a non-empty API key, that it has a
/// model, and that the identifier names a supported backend.
pub fn resolve(config: &Config) -> Result<Box<dyn CommitMessageProvider>, ProviderError> {
    let name = config.active_provider.as_str();

    let api_key = config
        .api_key(name)
        .ok_or_else(|| ProviderError::KeyNotConfigured {
            backend: name.to_string(),
        })?;

    let model = config
        .model(name)
        .ok_or_else(|| ProviderError::ModelNotConfigured {
            backend: name.to_string(),
        })?;

    let backend: Backend = name.parse()?;
    debug!("Resolved provider {} with model {}", backend, model);

    Ok(match backend {
        Backend::OpenAi => Box::new(OpenAiProvider::new(api_key, model)),
        Backend::Claude => Box::new(ClaudeProvider::new(api_key, model)),
    })
}
