//! Git collaborators: where the diff comes from and where the commit goes.

pub mod cli;

pub use cli::{CommitSink, DiffSource, GitCli, check_git_installed};
