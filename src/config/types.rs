//! Configuration data model and supported backends.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ProviderError;

/// Supported LLM backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    OpenAi,
    Claude,
}

impl Backend {
    /// Every supported backend. The first entry is the default.
    pub const ALL: [Backend; 2] = [Backend::OpenAi, Backend::Claude];

    /// Identifier used in the config file and on the command line.
    pub fn id(&self) -> &'static str {
        match self {
            Backend::OpenAi => "openai",
            Backend::Claude => "claude",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::OpenAi => "OpenAI",
            Backend::Claude => "Claude",
        }
    }

    /// Model used until the user configures another one.
    pub fn default_model(&self) -> &'static str {
        match self {
            Backend::OpenAi => "gpt-4o",
            Backend::Claude => "claude-3-sonnet-20240229",
        }
    }
}

impl Default for Backend {
    fn default() -> Self {
        Backend::ALL[0]
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Backend {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Backend::ALL
            .into_iter()
            .find(|b| b.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ProviderError::UnsupportedBackend(s.to_string()))
    }
}

/// The persisted configuration.
///
/// `active_provider` stays a plain string so a hand-edited file with an unknown
/// backend still loads; it is rejected when a provider is resolved.
/// Fields missing from the file, or written as `null`, fall back to their
/// defaults on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(
        default = "default_active_provider",
        deserialize_with = "null_as_default_active_provider"
    )]
    pub active_provider: String,
    #[serde(
        default = "default_api_keys",
        deserialize_with = "null_as_default_api_keys"
    )]
    pub api_keys: BTreeMap<String, String>,
    #[serde(default = "default_models", deserialize_with = "null_as_default_models")]
    pub models: BTreeMap<String, String>,
}

fn null_as_default_active_provider<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<String, D::Error> {
    Ok(Option::deserialize(deserializer)?.unwrap_or_else(default_active_provider))
}

fn null_as_default_api_keys<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<BTreeMap<String, String>, D::Error> {
    Ok(Option::deserialize(deserializer)?.unwrap_or_else(default_api_keys))
}

fn null_as_default_models<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<BTreeMap<String, String>, D::Error> {
    Ok(Option::deserialize(deserializer)?.unwrap_or_else(default_models))
}

fn default_active_provider() -> String {
    Backend::default().id().to_string()
}

fn default_api_keys() -> BTreeMap<String, String> {
    Backend::ALL
        .iter()
        .map(|b| (b.id().to_string(), String::new()))
        .collect()
}

fn default_models() -> BTreeMap<String, String> {
    Backend::ALL
        .iter()
        .map(|b| (b.id().to_string(), b.default_model().to_string()))
        .collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            active_provider: default_active_provider(),
            api_keys: default_api_keys(),
            models: default_models(),
        }
    }
}

impl Config {
    /// API key for a backend identifier, treating an empty string as unset.
    pub fn api_key(&self, backend: &str) -> Option<&str> {
        self.api_keys
            .get(backend)
            .map(String::as_str)
            .filter(|k| !k.is_empty())
    }

    pub fn model(&self, backend: &str) -> Option<&str> {
        self.models.get(backend).map(String::as_str)
    }

    pub fn set_api_key(&mut self, backend: Backend, key: impl Into<String>) {
        self.api_keys.insert(backend.id().to_string(), key.into());
    }

    pub fn set_active_backend(&mut self, backend: Backend) {
        self.active_provider = backend.id().to_string();
    }
}
