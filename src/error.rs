//! Error types for gitcm modules using thiserror.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::Backend;

/// Errors from loading or persisting the configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not find home directory. Set GITCM_CONFIG_DIR to choose a config location.")]
    HomeDirUnavailable,

    #[error("Could not create config directory '{path}': {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Failed to write config file '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors from selecting the active backend.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("API key not set for provider {backend}. Run 'gitcm config set-{backend}-key <KEY>' first")]
    KeyNotConfigured { backend: String },

    #[error("Model not configured for provider {backend}")]
    ModelNotConfigured { backend: String },

    #[error("Unsupported provider: {0}. Use 'openai' or 'claude'.")]
    UnsupportedBackend(String),
}

/// Errors from a single suggestion round trip to a backend.
#[derive(Error, Debug)]
pub enum SuggestError {
    #[error("No diff provided")]
    EmptyDiff,

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Failed to send request to {backend}: {source}")]
    Request {
        backend: Backend,
        #[source]
        source: reqwest::Error,
    },

    #[error("{backend} API error (status {status}): {body}")]
    Api {
        backend: Backend,
        status: u16,
        body: String,
    },

    #[error("{backend} returned an unexpected response: {message}")]
    InvalidResponse { backend: Backend, message: String },

    #[error("No suggestion received from {backend}")]
    NoSuggestion { backend: Backend },
}

/// Errors from invoking the git executable.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("git executable not found in PATH")]
    NotInstalled,

    #[error("Failed to run git {operation}: {source}")]
    SpawnFailed {
        operation: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("git {operation} failed{}: {stderr}",
             code.map_or(String::new(), |c| format!(" with exit code {c}")))]
    CommandFailed {
        operation: &'static str,
        code: Option<i32>,
        stderr: String,
    },
}

/// Errors from the suggest-and-commit flow, tagged by the stage that failed.
#[derive(Error, Debug)]
pub enum FlowError {
    #[error("Error loading config: {0}")]
    Config(#[from] ConfigError),

    #[error("Error getting git diff: {0}")]
    Diff(#[source] GitError),

    #[error("No staged changes found. Add files with 'git add' first")]
    NoStagedChanges,

    #[error("Error initializing AI provider: {0}")]
    Provider(#[from] ProviderError),

    #[error("Error getting suggestion: {0}")]
    Suggest(#[from] SuggestError),

    #[error("Error reading input: {0}")]
    Prompt(#[source] std::io::Error),

    #[error("Error committing: {0}")]
    Commit(#[source] GitError),
}
