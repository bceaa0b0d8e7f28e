//! Persisted user configuration: active backend, API keys and models.

pub mod store;
pub mod types;

pub use store::{CONFIG_DIR_ENV_VAR, ConfigStore};
pub use types::{Backend, Config};
