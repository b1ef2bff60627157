//! Search command - look up one item by name or number.

use anyhow::Result;
use catadex_core::FavoriteEntry;
use catadex_fetch::SearchQuery;
use clap::Args;
use tracing::debug;

use crate::context::AppContext;
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the search command.
#[derive(Args)]
pub struct SearchArgs {
    /// Name or catalog number.
    pub query: String,

    /// Add the result to favorites.
    #[arg(long)]
    pub add: bool,
}

/// Runs the search command.
pub async fn run(args: &SearchArgs, cli: &Cli, ctx: &AppContext) -> Result<()> {
    ctx.require_session().await?;

    let query = SearchQuery::parse(&args.query)?;
    debug!(query = %query, "Searching");
    let item = ctx.catalog()?.search(&query).await?;

    if args.add && ctx.favorites.add(FavoriteEntry::from(&item)).await? && !cli.quiet {
        eprintln!("Added {} to favorites.", item.display_name());
    }
    let favorite = ctx.favorites.is_favorite(item.id).await?;

    match cli.format {
        OutputFormat::Text => {
            println!("{}", TextFormatter::new(!cli.no_color).format_card(&item, favorite));
        }
        OutputFormat::Json => {
            println!("{}", JsonFormatter::new(cli.pretty).format_item(&item, Some(favorite))?);
        }
    }
    Ok(())
}
