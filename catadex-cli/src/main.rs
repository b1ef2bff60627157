// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! Catadex CLI - browse a remote creature catalog from the command line.
//!
//! # Examples
//!
//! ```bash
//! # Create an account and sign in
//! catadex register --username ash --password pikachu --name "Ash Ketchum" --email ash@pallet.town
//! catadex login --username ash --password pikachu
//!
//! # Load the first three pages
//! catadex browse --pages 3
//!
//! # Look something up and keep it
//! catadex search pikachu --add
//! catadex favorites list
//!
//! # JSON output
//! catadex --format json --pretty show 25
//! ```

mod commands;
mod context;
mod notifier;
mod output;

use anyhow::Result;
use catadex_fetch::FetchError;
use catadex_store::{LogLevel, SettingsStore};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use commands::{auth, browse, config, favorites, search, show};
use context::{AppContext, SessionRequired};

// ============================================================================
// CLI Definition
// ============================================================================

/// Catadex CLI - browse a remote creature catalog.
#[derive(Parser)]
#[command(name = "catadex")]
#[command(about = "Browse a remote creature catalog")]
#[command(long_about = r#"
Catadex pages through a remote catalog, fetching each entry's details in
small concurrent batches with retries, and keeps local accounts and a
favorites list.

Examples:
  catadex login --username ash --password pikachu
  catadex browse --pages 2         # First two pages
  catadex search 25                # Look up by number
  catadex show bulbasaur           # Full detail card
  catadex favorites list           # Saved favorites
  catadex --format json browse     # JSON output
"#)]
#[command(version)]
#[command(author = "Catadex Contributors")]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (minimal output).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Create a local account.
    Register(auth::RegisterArgs),

    /// Sign in.
    Login(auth::LoginArgs),

    /// Sign out.
    Logout,

    /// Show the signed-in account.
    Whoami,

    /// Load catalog pages and list what was fetched.
    #[command(visible_alias = "b")]
    Browse(browse::BrowseArgs),

    /// Look up a single item by name or number.
    #[command(visible_alias = "s")]
    Search(search::SearchArgs),

    /// Show the detail card of an item.
    Show(show::ShowArgs),

    /// Manage favorites.
    #[command(visible_alias = "fav")]
    Favorites(favorites::FavoritesArgs),

    /// Manage configuration.
    Config(config::ConfigArgs),
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text with colors.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// CLI exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// General error.
    Error = 1,
    /// Command needs a signed-in account.
    SessionRequired = 2,
    /// Item not found.
    NotFound = 3,
    /// Catalog unreachable.
    Network = 4,
}

impl ExitCode {
    fn for_error(error: &anyhow::Error) -> Self {
        if error.downcast_ref::<SessionRequired>().is_some() {
            return ExitCode::SessionRequired;
        }
        match error.downcast_ref::<FetchError>() {
            Some(FetchError::NotFound(_)) => ExitCode::NotFound,
            Some(e) if e.status() == Some(404) => ExitCode::NotFound,
            Some(e) if e.is_retryable() || e.attempts().is_some() => ExitCode::Network,
            _ => ExitCode::Error,
        }
    }
}

/// Text shown for a failed command.
///
/// Catalog failures show their short user message; the full chain only
/// goes to the log.
fn error_message(error: &anyhow::Error) -> String {
    match error.downcast_ref::<FetchError>() {
        Some(e) => e.user_message().to_string(),
        None => format!("{error:#}"),
    }
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool, level: LogLevel) {
    if quiet {
        return;
    }

    let filter = if verbose {
        EnvFilter::new("catadex=debug,info")
    } else {
        EnvFilter::new(format!("catadex={level}"))
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = SettingsStore::load_default().await;
    let current = settings.get().await;
    setup_logging(cli.verbose, cli.quiet, current.log_level);

    let ctx = AppContext::load(&cli, current).await;

    let result = match &cli.command {
        Commands::Register(args) => auth::register(args, &cli, &ctx).await,
        Commands::Login(args) => auth::login(args, &cli, &ctx).await,
        Commands::Logout => auth::logout(&cli, &ctx).await,
        Commands::Whoami => auth::whoami(&cli, &ctx).await,
        Commands::Browse(args) => browse::run(args, &cli, &ctx).await,
        Commands::Search(args) => search::run(args, &cli, &ctx).await,
        Commands::Show(args) => show::run(args, &cli, &ctx).await,
        Commands::Favorites(args) => favorites::run(args, &cli, &ctx).await,
        Commands::Config(args) => config::run(args, &cli, &settings).await,
    };

    if let Err(e) = result {
        debug!(error = %format!("{e:#}"), "Command failed");
        if !cli.quiet {
            eprintln!("Error: {}", error_message(&e));
        }
        std::process::exit(ExitCode::for_error(&e) as i32);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http(status: u16) -> FetchError {
        FetchError::Http {
            status,
            status_text: String::new(),
        }
    }

    #[test]
    fn test_missing_item_exits_not_found() {
        let exhausted = FetchError::RetryExhausted {
            attempts: 4,
            source: Box::new(http(404)),
        };
        assert_eq!(ExitCode::for_error(&exhausted.into()), ExitCode::NotFound);

        let direct = FetchError::NotFound("missingno".into());
        assert_eq!(ExitCode::for_error(&direct.into()), ExitCode::NotFound);
    }

    #[test]
    fn test_unreachable_catalog_exits_network() {
        let exhausted = FetchError::RetryExhausted {
            attempts: 4,
            source: Box::new(http(503)),
        };
        assert_eq!(ExitCode::for_error(&exhausted.into()), ExitCode::Network);

        let timeout = FetchError::Timeout { duration_ms: 15_000 };
        assert_eq!(ExitCode::for_error(&timeout.into()), ExitCode::Network);
    }

    #[test]
    fn test_other_errors() {
        assert_eq!(
            ExitCode::for_error(&SessionRequired.into()),
            ExitCode::SessionRequired
        );
        assert_eq!(
            ExitCode::for_error(&anyhow::anyhow!("invalid username or password")),
            ExitCode::Error
        );
    }

    #[test]
    fn test_catalog_failure_message_hides_details() {
        let error: anyhow::Error = FetchError::Aggregation {
            offset: 0,
            source: Box::new(FetchError::RetryExhausted {
                attempts: 4,
                source: Box::new(FetchError::Network("tcp connect error: 10.0.0.1:443".into())),
            }),
        }
        .into();

        let message = error_message(&error);
        assert_eq!(message, "Could not load the catalog. Try again later.");
        assert!(!message.contains("10.0.0.1"));
    }

    #[test]
    fn test_non_catalog_message_keeps_chain() {
        let error = anyhow::anyhow!("disk full").context("failed to save favorites");
        assert_eq!(error_message(&error), "failed to save favorites: disk full");
    }
}
