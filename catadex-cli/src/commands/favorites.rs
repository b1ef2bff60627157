//! Favorites command - list and edit saved items.

use anyhow::Result;
use catadex_core::FavoriteEntry;
use catadex_fetch::SearchQuery;
use clap::{Args, Subcommand};
use tracing::info;

use crate::context::AppContext;
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the favorites command.
#[derive(Args)]
pub struct FavoritesArgs {
    #[command(subcommand)]
    pub action: FavoritesAction,
}

/// Favorites subcommands.
#[derive(Subcommand)]
pub enum FavoritesAction {
    /// List favorites.
    List,

    /// Add an item by name or number.
    Add {
        /// Name or catalog number.
        item: String,
    },

    /// Remove an item by number.
    Remove {
        /// Catalog number.
        id: u32,
    },

    /// Add the item if absent, remove it otherwise.
    Toggle {
        /// Name or catalog number.
        item: String,
    },
}

/// Runs the favorites command.
pub async fn run(args: &FavoritesArgs, cli: &Cli, ctx: &AppContext) -> Result<()> {
    ctx.require_session().await?;

    match &args.action {
        FavoritesAction::List => list(cli, ctx).await,
        FavoritesAction::Add { item } => add(item, cli, ctx).await,
        FavoritesAction::Remove { id } => remove(*id, cli, ctx).await,
        FavoritesAction::Toggle { item } => toggle(item, cli, ctx).await,
    }
}

async fn list(cli: &Cli, ctx: &AppContext) -> Result<()> {
    let favorites = ctx.favorites.list().await?;

    match cli.format {
        OutputFormat::Text => {
            println!("{}", TextFormatter::new(!cli.no_color).format_favorites(&favorites));
        }
        OutputFormat::Json => println!("{}", JsonFormatter::new(cli.pretty).format(&favorites)?),
    }
    Ok(())
}

/// Resolves user input to a favorite entry through the catalog.
async fn lookup(item: &str, ctx: &AppContext) -> Result<FavoriteEntry> {
    let query = SearchQuery::parse(item)?;
    let detail = ctx.catalog()?.search(&query).await?;
    Ok(FavoriteEntry::from(&detail))
}

async fn add(item: &str, cli: &Cli, ctx: &AppContext) -> Result<()> {
    let entry = lookup(item, ctx).await?;
    let name = entry.display_name();
    let id = entry.id;
    let added = ctx.favorites.add(entry).await?;
    info!(id, added, "Favorite add");

    report(cli, id, &name, true, added)
}

async fn remove(id: u32, cli: &Cli, ctx: &AppContext) -> Result<()> {
    let removed = ctx.favorites.remove(id).await?;
    info!(id, removed, "Favorite remove");

    report(cli, id, &format!("#{id:03}"), false, removed)
}

async fn toggle(item: &str, cli: &Cli, ctx: &AppContext) -> Result<()> {
    if let Ok(SearchQuery::ById(id)) = SearchQuery::parse(item) {
        if ctx.favorites.remove(id).await? {
            return report(cli, id, &format!("#{id:03}"), false, true);
        }
    }

    let entry = lookup(item, ctx).await?;
    let name = entry.display_name();
    let id = entry.id;
    let now_favorite = ctx.favorites.toggle(entry).await?;

    report(cli, id, &name, now_favorite, true)
}

fn report(cli: &Cli, id: u32, name: &str, favorite: bool, changed: bool) -> Result<()> {
    match cli.format {
        OutputFormat::Text => {
            if cli.quiet {
                return Ok(());
            }
            match (favorite, changed) {
                (true, true) => println!("Added {name} to favorites."),
                (true, false) => println!("{name} is already a favorite."),
                (false, true) => println!("Removed {name} from favorites."),
                (false, false) => println!("{name} is not a favorite."),
            }
        }
        OutputFormat::Json => {
            let output = serde_json::json!({"id": id, "favorite": favorite, "changed": changed});
            println!("{}", JsonFormatter::new(cli.pretty).format(&output)?);
        }
    }
    Ok(())
}
