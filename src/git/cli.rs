//! Staged diff and commit via the system `git` binary.
//!
//! Shelling out keeps the user's git config, hooks and signing setup in play.

use std::path::PathBuf;
use std::process::{Command, Output};

use tracing::debug;

use crate::error::GitError;

/// Source of the staged diff.
#[cfg_attr(test, mockall::automock)]
pub trait DiffSource {
    /// Unified diff of staged changes; empty when nothing is staged.
    fn staged_diff(&self) -> Result<String, GitError>;
}

/// Destination for an accepted commit message.
#[cfg_attr(test, mockall::automock)]
pub trait CommitSink {
    fn commit(&self, message: &str) -> Result<(), GitError>;
}

/// Runs `git` in a working directory (the current one by default).
#[derive(Debug, Clone, Default)]
pub struct GitCli {
    workdir: Option<PathBuf>,
}

impl GitCli {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_dir(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: Some(workdir.into()),
        }
    }

    /// Run a git command and return its output on success.
    fn run_git(&self, args: &[&str], operation: &'static str) -> Result<Output, GitError> {
        let mut command = Command::new("git");
        command.args(args);
        if let Some(dir) = &self.workdir {
            command.current_dir(dir);
        }

        debug!("Running git {}", operation);
        let output = command
            .output()
            .map_err(|e| GitError::SpawnFailed { operation, source: e })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(GitError::CommandFailed {
                operation,
                code: output.status.code(),
                stderr,
            });
        }

        Ok(output)
    }
}

impl DiffSource for GitCli {
    fn staged_diff(&self) -> Result<String, GitError> {
        let output = self.run_git(&["diff", "--staged"], "diff")?;
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl CommitSink for GitCli {
    fn commit(&self, message: &str) -> Result<(), GitError> {
        self.run_git(&["commit", "-m", message], "commit")?;
        Ok(())
    }
}

/// Check that a `git` executable is on the PATH.
pub fn check_git_installed() -> Result<(), GitError> {
    which::which("git").map(|_| ()).map_err(|_| GitError::NotInstalled)
}
