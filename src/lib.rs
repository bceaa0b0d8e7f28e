//! gitcm - suggest commit messages for staged changes with OpenAI or Claude.
//!
//! # Overview
//!
//! gitcm reads `git diff --staged`, asks the configured backend for a
//! conventional-commit style message, and commits with it once the user
//! agrees. API keys, models and the active backend live in a small JSON file
//! under `~/.config/gitcm`.

pub mod commit;
pub mod config;
pub mod error;
pub mod git;
pub mod llm;

// Re-export commonly used types
pub use commit::{Outcome, SuggestFlow};
pub use config::{Backend, Config, ConfigStore};
pub use error::{ConfigError, FlowError, GitError, ProviderError, SuggestError};
pub use llm::{ClaudeProvider, CommitMessageProvider, OpenAiProvider, resolve};
