//! LLM backends that turn a staged diff into a commit message suggestion.

pub mod claude;
mod http;
pub mod openai;
pub mod prompt;
pub mod provider;

pub use claude::{CLAUDE_API_URL, ClaudeProvider};
pub use http::TIMEOUT_ENV_VAR;
pub use openai::{OPENAI_API_URL, OpenAiProvider};
pub use provider::{CommitMessageProvider, resolve};
