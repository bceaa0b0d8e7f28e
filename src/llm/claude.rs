//! Anthropic Messages API backend.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::Backend;
use crate::error::SuggestError;
use crate::llm::http::{build_client, send_json};
use crate::llm::prompt::single_turn_prompt;
use crate::llm::provider::CommitMessageProvider;

pub const CLAUDE_API_URL: &str = "https://api.anthropic.com/v1/messages";

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Output cap for a commit message.
const MAX_TOKENS: u32 = 300;

pub struct ClaudeProvider {
    api_key: String,
    model: String,
    endpoint: String,
}

#[derive(Serialize)]
struct ClaudeRequest<'a> {
    model: &'a str,
    messages: Vec<ClaudeMessage>,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ClaudeMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct ClaudeResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

/// A response content block. Only text blocks contribute to the suggestion.
#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentBlock {
    Text {
        text: String,
    },
    #[serde(other)]
    Other,
}

impl ClaudeProvider {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            endpoint: CLAUDE_API_URL.to_string(),
        }
    }

    /// Send requests to `endpoint` instead of the public API.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    fn build_request(&self, diff: &str) -> ClaudeRequest<'_> {
        ClaudeRequest {
            model: &self.model,
            messages: vec![ClaudeMessage {
                role: "user",
                content: single_turn_prompt(diff),
            }],
            max_tokens: MAX_TOKENS,
        }
    }
}

impl fmt::Debug for ClaudeProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClaudeProvider")
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

/// Concatenate text blocks in order; an empty block list means no suggestion.
fn extract_suggestion(response: ClaudeResponse) -> Result<String, SuggestError> {
    if response.content.is_empty() {
        return Err(SuggestError::NoSuggestion {
            backend: Backend::Claude,
        });
    }

    Ok(response
        .content
        .into_iter()
        .filter_map(|block| match block {
            ContentBlock::Text { text } => Some(text),
            ContentBlock::Other => None,
        })
        .collect())
}

#[async_trait]
impl CommitMessageProvider for ClaudeProvider {
    fn backend(&self) -> Backend {
        Backend::Claude
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn suggest(&self, diff: &str) -> Result<String, SuggestError> {
        if diff.is_empty() {
            return Err(SuggestError::EmptyDiff);
        }

        let body = self.build_request(diff);
        debug!("Sending {} byte diff to Claude ({})", diff.len(), self.model);

        let request = build_client()?
            .post(&self.endpoint)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body);

        let response: ClaudeResponse = send_json(Backend::Claude, request).await?;
        extract_suggestion(response)
    }
}
