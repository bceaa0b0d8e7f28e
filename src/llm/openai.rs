//! OpenAI chat completions backend.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::Backend;
use crate::error::SuggestError;
use crate::llm::http::{build_client, send_json};
use crate::llm::prompt::{SYSTEM_PROMPT, chat_user_prompt};
use crate::llm::provider::CommitMessageProvider;

pub const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";

pub struct OpenAiProvider {
    api_key: String,
    model: String,
    endpoint: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAiProvider {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            endpoint: OPENAI_API_URL.to_string(),
        }
    }

    /// Send requests to `endpoint` instead of the public API.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    fn build_request(&self, diff: &str) -> ChatRequest<'_> {
        ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: chat_user_prompt(diff),
                },
            ],
        }
    }
}

impl fmt::Debug for OpenAiProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiProvider")
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

/// Take the first choice's content; an empty list means no suggestion.
fn extract_suggestion(response: ChatResponse) -> Result<String, SuggestError> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or(SuggestError::NoSuggestion {
            backend: Backend::OpenAi,
        })?;

    Ok(choice.message.content.unwrap_or_default())
}

#[async_trait]
impl CommitMessageProvider for OpenAiProvider {
    fn backend(&self) -> Backend {
        Backend::OpenAi
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn suggest(&self, diff: &str) -> Result<String, SuggestError> {
        if diff.is_empty() {
            return Err(SuggestError::EmptyDiff);
        }

        let body = self.build_request(diff);
        debug!("Sending {} byte diff to OpenAI ({})", diff.len(), self.model);

        let request = build_client()?
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body);

        let response: ChatResponse = send_json(Backend::OpenAi, request).await?;
        extract_suggestion(response)
    }
}
