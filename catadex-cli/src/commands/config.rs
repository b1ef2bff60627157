//! Config command - manage configuration.

use anyhow::Result;
use catadex_store::{SettingsStore, default_config_dir, default_store_path};
use clap::{Args, Subcommand};
use tracing::info;

use crate::output::JsonFormatter;
use crate::{Cli, OutputFormat};

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration.
    Show,

    /// Show configuration paths.
    Path,

    /// Set a value, e.g. `config set page_size 40`.
    Set {
        /// Setting name.
        key: String,
        /// New value.
        value: String,
    },

    /// Reset to defaults.
    Reset,
}

/// Runs the config command.
pub async fn run(args: &ConfigArgs, cli: &Cli, store: &SettingsStore) -> Result<()> {
    match &args.action {
        ConfigAction::Show => show_config(cli, store).await,
        ConfigAction::Path => show_paths(cli, store),
        ConfigAction::Set { key, value } => set_value(key, value, cli, store).await,
        ConfigAction::Reset => reset_config(cli, store).await,
    }
}

async fn show_config(cli: &Cli, store: &SettingsStore) -> Result<()> {
    let settings = store.get().await;

    match cli.format {
        OutputFormat::Text => {
            println!("Catadex Configuration");
            println!("{}", "─".repeat(40));
            println!();
            println!("API base URL:       {}", settings.api_base_url);
            println!("Page size:          {}", settings.page_size);
            println!("Batch size:         {}", settings.batch_size);
            println!("Request timeout:    {} ms", settings.request_timeout_ms);
            println!("Max retries:        {}", settings.max_retries);
            println!("Backoff base:       {} ms", settings.backoff_base_ms);
            println!("Max jitter:         {} ms", settings.max_jitter_ms);
            println!("Alert cooldown:     {} ms", settings.alert_cooldown_ms);
            println!("Log level:          {}", settings.log_level);
            if settings.allowed_domains.is_empty() {
                println!("Allowed domains:    (any)");
            } else {
                println!("Allowed domains:    {}", settings.allowed_domains.join(", "));
            }
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&settings)?);
        }
    }

    Ok(())
}

fn show_paths(cli: &Cli, store: &SettingsStore) -> Result<()> {
    let config_dir = default_config_dir();
    let data_file = default_store_path();

    match cli.format {
        OutputFormat::Text => {
            println!("Configuration Paths");
            println!("{}", "─".repeat(40));
            println!();
            println!("Config dir:    {}", config_dir.display());
            println!("Settings file: {}", store.path().display());
            println!("Data file:     {}", data_file.display());
        }
        OutputFormat::Json => {
            let paths = serde_json::json!({
                "config_dir": config_dir.display().to_string(),
                "settings_file": store.path().display().to_string(),
                "data_file": data_file.display().to_string(),
            });
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&paths)?);
        }
    }

    Ok(())
}

async fn set_value(key: &str, value: &str, cli: &Cli, store: &SettingsStore) -> Result<()> {
    store.set(key, value).await?;

    info!(key, value, "Setting updated");
    if !cli.quiet {
        println!("{key} set to {value}");
    }

    Ok(())
}

async fn reset_config(cli: &Cli, store: &SettingsStore) -> Result<()> {
    store.reset().await?;

    info!(path = %store.path().display(), "Settings reset");
    if !cli.quiet {
        println!("Configuration reset to defaults");
    }

    Ok(())
}
