//! Loading and persisting the configuration file.
//!
//! Every mutation is a fresh load, one change, and a full write, so no
//! configuration object outlives a single command.

use std::env;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::config::types::{Backend, Config};
use crate::error::ConfigError;

/// Environment variable that overrides the config directory.
pub const CONFIG_DIR_ENV_VAR: &str = "GITCM_CONFIG_DIR";

const CONFIG_FILE_NAME: &str = "config.json";

/// Handle on the config file at a fixed location.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Open the store at the per-user location.
    ///
    /// Uses `$GITCM_CONFIG_DIR/config.json` when the variable is set,
    /// otherwise `~/.config/gitcm/config.json`.
    pub fn open() -> Result<Self, ConfigError> {
        Ok(Self::at(default_config_dir()?.join(CONFIG_FILE_NAME)))
    }

    /// Open the store at an explicit file path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the configuration, returning defaults when no file exists yet.
    pub fn load(&self) -> Result<Config, ConfigError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No config at {}, using defaults", self.path.display());
                return Ok(Config::default());
            }
            Err(e) => {
                return Err(ConfigError::Read {
                    path: self.path.clone(),
                    source: e,
                });
            }
        };

        serde_json::from_str(&content).map_err(|e| ConfigError::Parse {
            path: self.path.clone(),
            source: e,
        })
    }

    /// Write the whole configuration, readable by the owner only.
    ///
    /// The file is written to a temporary sibling and renamed into place.
    pub fn persist(&self, config: &Config) -> Result<(), ConfigError> {
        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        create_private_dir(dir)?;

        let mut data = serde_json::to_string_pretty(config).map_err(ConfigError::Serialize)?;
        data.push('\n');

        let write_err = |source: std::io::Error| ConfigError::Write {
            path: self.path.clone(),
            source,
        };

        let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
        tmp.write_all(data.as_bytes()).map_err(write_err)?;
        restrict_to_owner(tmp.as_file()).map_err(write_err)?;
        tmp.persist(&self.path).map_err(|e| write_err(e.error))?;

        debug!("Saved config to {}", self.path.display());
        Ok(())
    }

    /// Store an API key for one backend, leaving everything else untouched.
    pub fn set_api_key(&self, backend: Backend, key: &str) -> Result<(), ConfigError> {
        let mut config = self.load()?;
        config.set_api_key(backend, key);
        self.persist(&config)
    }

    /// Switch the active backend. Whether it has a key is checked later,
    /// when a provider is resolved.
    pub fn set_active_backend(&self, backend: Backend) -> Result<(), ConfigError> {
        let mut config = self.load()?;
        config.set_active_backend(backend);
        self.persist(&config)
    }
}

fn default_config_dir() -> Result<PathBuf, ConfigError> {
    match env::var_os(CONFIG_DIR_ENV_VAR) {
        Some(dir) if !dir.is_empty() => Ok(PathBuf::from(dir)),
        _ => dirs::home_dir()
            .map(|home| home.join(".config").join("gitcm"))
            .ok_or(ConfigError::HomeDirUnavailable),
    }
}

#[cfg(unix)]
fn create_private_dir(dir: &Path) -> Result<(), ConfigError> {
    use std::os::unix::fs::DirBuilderExt;

    fs::DirBuilder::new()
        .recursive(true)
        .mode(0o700)
        .create(dir)
        .map_err(|e| ConfigError::CreateDir {
            path: dir.to_path_buf(),
            source: e,
        })
}

#[cfg(not(unix))]
fn create_private_dir(dir: &Path) -> Result<(), ConfigError> {
    fs::create_dir_all(dir).map_err(|e| ConfigError::CreateDir {
        path: dir.to_path_buf(),
        source: e,
    })
}

#[cfg(unix)]
fn restrict_to_owner(file: &fs::File) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    file.set_permissions(fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_to_owner(_file: &fs::File) -> std::io::Result<()> {
    Ok(())
}
