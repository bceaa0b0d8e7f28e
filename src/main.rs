//! gitcm - CLI entry point.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use gitcm::commit::TerminalConfirmer;
use gitcm::git::{GitCli, check_git_installed};
use gitcm::{Backend, Config, ConfigStore, FlowError, SuggestFlow};

/// Suggest commit messages for staged changes using OpenAI or Claude.
#[derive(Parser, Debug)]
#[command(name = "gitcm")]
#[command(about = "Suggest commit messages for staged changes using OpenAI or Claude")]
#[command(version)]
struct Cli {
    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Configure API keys and the active provider
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Get a commit suggestion for staged changes
    Suggest,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Set your OpenAI API key
    SetOpenaiKey { key: String },

    /// Set your Claude API key
    SetClaudeKey { key: String },

    /// Set the active provider
    UseProvider { provider: ProviderArg },

    /// Show the current configuration with keys masked
    Show,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ProviderArg {
    Openai,
    Claude,
}

impl From<ProviderArg> for Backend {
    fn from(arg: ProviderArg) -> Self {
        match arg {
            ProviderArg::Openai => Backend::OpenAi,
            ProviderArg::Claude => Backend::Claude,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let store = ConfigStore::open().context("Failed to locate config file")?;

    match cli.command {
        Command::Config(command) => run_config(&store, command),
        Command::Suggest => run_suggest(&store).await,
    }
}

fn init_tracing(verbose: bool) -> Result<()> {
    let level = if verbose { "gitcm=debug" } else { "gitcm=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.parse()?))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
    Ok(())
}

fn run_config(store: &ConfigStore, command: ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::SetOpenaiKey { key } => save_key(store, Backend::OpenAi, &key),
        ConfigCommand::SetClaudeKey { key } => save_key(store, Backend::Claude, &key),
        ConfigCommand::UseProvider { provider } => {
            let backend = Backend::from(provider);
            store
                .set_active_backend(backend)
                .context("Error setting active provider")?;
            println!("Now using {} as the active provider.", backend.id());
            Ok(())
        }
        ConfigCommand::Show => {
            let config = store.load().context("Error loading config")?;
            print_config(store, &config);
            Ok(())
        }
    }
}

fn save_key(store: &ConfigStore, backend: Backend, key: &str) -> Result<()> {
    store
        .set_api_key(backend, key)
        .with_context(|| format!("Error saving {} API key", backend))?;
    println!("{} API key saved successfully!", backend);
    Ok(())
}

async fn run_suggest(store: &ConfigStore) -> Result<()> {
    check_git_installed().map_err(FlowError::Diff)?;

    let git = GitCli::new();
    let flow = SuggestFlow::new(git.clone(), git, TerminalConfirmer);
    flow.run(store).await?;
    Ok(())
}

fn print_config(store: &ConfigStore, config: &Config) {
    println!("Config file: {}", store.path().display());
    println!("Active provider: {}", config.active_provider);

    for backend in Backend::ALL {
        let id = backend.id();
        println!("\n[{}]", id);
        println!(
            "  model:   {}",
            config.model(id).unwrap_or("(not set)")
        );
        println!(
            "  api key: {}",
            config.api_key(id).map_or_else(|| "(not set)".to_string(), mask_key)
        );
    }
}

/// Show the first four characters of a key and hide the rest.
fn mask_key(key: &str) -> String {
    let prefix: String = key.chars().take(4).collect();
    format!("{prefix}••••••••")
}
