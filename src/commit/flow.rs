//! The suggest flow: staged diff, provider, suggestion, confirmation, commit.

use tracing::debug;

use crate::commit::confirm::{Confirmer, is_affirmative};
use crate::config::{Backend, Config, ConfigStore};
use crate::error::{FlowError, ProviderError};
use crate::git::{CommitSink, DiffSource};
use crate::llm::{CommitMessageProvider, resolve};

/// Builds the provider for a loaded configuration.
pub trait ProviderFactory {
    fn build(&self, config: &Config) -> Result<Box<dyn CommitMessageProvider>, ProviderError>;
}

/// Factory backed by [`resolve`].
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultFactory;

impl ProviderFactory for DefaultFactory {
    fn build(&self, config: &Config) -> Result<Box<dyn CommitMessageProvider>, ProviderError> {
        resolve(config)
    }
}

impl<F> ProviderFactory for F
where
    F: Fn(&Config) -> Result<Box<dyn CommitMessageProvider>, ProviderError>,
{
    fn build(&self, config: &Config) -> Result<Box<dyn CommitMessageProvider>, ProviderError> {
        self(config)
    }
}

/// How a successful run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Committed { message: String },
    Cancelled { message: String },
}

pub struct SuggestFlow<D, C, P, F = DefaultFactory> {
    diff_source: D,
    commit_sink: C,
    confirmer: P,
    factory: F,
}

impl<D, C, P> SuggestFlow<D, C, P, DefaultFactory>
where
    D: DiffSource,
    C: CommitSink,
    P: Confirmer,
{
    pub fn new(diff_source: D, commit_sink: C, confirmer: P) -> Self {
        Self {
            diff_source,
            commit_sink,
            confirmer,
            factory: DefaultFactory,
        }
    }
}

impl<D, C, P, F> SuggestFlow<D, C, P, F>
where
    D: DiffSource,
    C: CommitSink,
    P: Confirmer,
    F: ProviderFactory,
{
    /// Replace the provider factory.
    pub fn with_factory<G: ProviderFactory>(self, factory: G) -> SuggestFlow<D, C, P, G> {
        SuggestFlow {
            diff_source: self.diff_source,
            commit_sink: self.commit_sink,
            confirmer: self.confirmer,
            factory,
        }
    }

    /// Run the flow once. Any failure stops it; declining is not a failure.
    pub async fn run(&self, store: &ConfigStore) -> Result<Outcome, FlowError> {
        let config = store.load()?;

        let diff = self.diff_source.staged_diff().map_err(FlowError::Diff)?;
        if diff.is_empty() {
            return Err(FlowError::NoStagedChanges);
        }
        debug!("Staged diff is {} bytes", diff.len());

        let provider = self.factory.build(&config)?;

        println!("{}", progress_line(provider.backend()));
        let suggestion = provider.suggest(&diff).await?;

        println!("\nSuggested commit message:");
        println!("\"{}\"\n", suggestion);

        let answer = self
            .confirmer
            .ask("Use this message? (y/n)")
            .map_err(FlowError::Prompt)?;

        if !is_affirmative(&answer) {
            println!("Commit cancelled.");
            return Ok(Outcome::Cancelled {
                message: suggestion,
            });
        }

        self.commit_sink
            .commit(&suggestion)
            .map_err(FlowError::Commit)?;
        println!("Commit completed!");

        Ok(Outcome::Committed {
            message: suggestion,
        })
    }
}

/// Names the backend by the identifier used in the config file.
fn progress_line(backend: Backend) -> String {
    format!("Getting commit suggestion using {}...", backend.id())
}
