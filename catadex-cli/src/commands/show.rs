//! Show command - full detail card.

use anyhow::Result;
use catadex_fetch::SearchQuery;
use clap::Args;

use crate::context::AppContext;
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the show command.
#[derive(Args)]
pub struct ShowArgs {
    /// Catalog number or name.
    pub item: String,
}

/// Runs the show command.
///
/// Works signed out; the favorite marker only appears with a session.
/// A miss is reported as not found after a single request.
pub async fn run(args: &ShowArgs, cli: &Cli, ctx: &AppContext) -> Result<()> {
    let query = SearchQuery::parse(&args.item)?;
    let item = ctx.catalog()?.search(&query).await?;

    let favorite = match ctx.auth.current_session().await? {
        Some(_) => Some(ctx.favorites.is_favorite(item.id).await?),
        None => None,
    };

    match cli.format {
        OutputFormat::Text => {
            let card = TextFormatter::new(!cli.no_color).format_card(&item, favorite.unwrap_or(false));
            println!("{card}");
        }
        OutputFormat::Json => {
            println!("{}", JsonFormatter::new(cli.pretty).format_item(&item, favorite)?);
        }
    }
    Ok(())
}
