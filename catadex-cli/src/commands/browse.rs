//! Browse command - page through the catalog.

use anyhow::Result;
use catadex_fetch::ALERT_TITLE;
use clap::Args;
use tracing::{debug, info};

use crate::context::AppContext;
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the browse command.
#[derive(Args)]
pub struct BrowseArgs {
    /// Number of pages to load.
    #[arg(long, short = 'n', default_value = "1")]
    pub pages: u32,

    /// Items per page (overrides the configured page size).
    #[arg(long)]
    pub page_size: Option<u32>,
}

/// Runs the browse command.
pub async fn run(args: &BrowseArgs, cli: &Cli, ctx: &AppContext) -> Result<()> {
    ctx.require_session().await?;
    let aggregator = ctx.aggregator(args.page_size)?;

    for page in 0..args.pages.max(1) {
        if !aggregator.cursor().await.has_more() {
            break;
        }
        match aggregator.load_next_page().await {
            Ok(merged) => info!(page, merged, "Page done"),
            Err(e) => {
                // Nothing to print: the failure is reported once, by main.
                if aggregator.is_empty().await {
                    return Err(e.into());
                }
                debug!(page, error = %e, "Stopping after page failure");
                aggregator.alerts().notify_once(ALERT_TITLE, e.user_message());
                break;
            }
        }
    }

    let items = aggregator.items().await;
    let cursor = aggregator.cursor().await;

    match cli.format {
        OutputFormat::Text => {
            println!("{}", TextFormatter::new(!cli.no_color).format_list(&items, &cursor));
        }
        OutputFormat::Json => {
            println!("{}", JsonFormatter::new(cli.pretty).format_browse(&items, &cursor)?);
        }
    }
    Ok(())
}
