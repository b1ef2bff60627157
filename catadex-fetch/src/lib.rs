// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Catadex Fetch
//!
//! Remote catalog access for Catadex.
//!
//! ## Request primitives
//!
//! - [`host::http`] - HTTP client with tracing and domain allowlist, behind
//!   the [`JsonFetcher`] seam
//! - [`timeout::with_timeout`] - Per-attempt deadline that cancels the loser
//! - [`retry::RetryController`] - Exponential backoff with jitter
//!
//! ## Paging
//!
//! - [`cursor::PaginationCursor`] - Offset/limit state
//! - [`accumulator::AccumulatedSet`] - Ordered, id-deduplicated results
//! - [`aggregator::ListAggregator`] - Page, batch, merge, advance
//! - [`throttle::AlertThrottle`] - One alert per cooldown window
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use catadex_core::Notifier;
//! use catadex_fetch::*;
//!
//! let http = Arc::new(HttpClient::new()?);
//! let api = CatalogApi::new(DEFAULT_BASE_URL, RetryController::new(http, RetryPolicy::default()));
//! struct Stdout;
//! impl Notifier for Stdout {
//!     fn notify(&self, title: &str, message: &str) {
//!         println!("{title}: {message}");
//!     }
//! }
//!
//! let throttle = Arc::new(AlertThrottle::new(Arc::new(Stdout)));
//! let aggregator = ListAggregator::new(api, throttle, AggregatorConfig::default());
//!
//! let merged = aggregator.load_next_page().await?;
//! ```

pub mod accumulator;
pub mod aggregator;
pub mod api;
pub mod cursor;
pub mod error;
pub mod host;
pub mod parser;
pub mod retry;
pub mod search;
pub mod throttle;
pub mod timeout;

// Re-export key types at crate root

// Errors
pub use error::FetchError;

// Host APIs
pub use host::{HttpClient, JsonFetcher};

// Request primitives
pub use retry::{RetryController, RetryPolicy};
pub use timeout::with_timeout;

// Catalog
pub use accumulator::AccumulatedSet;
pub use aggregator::{
    ALERT_ITEMS_UNAVAILABLE, ALERT_NO_MORE_ITEMS, ALERT_TITLE, AggregatorConfig, ListAggregator,
};
pub use api::{CatalogApi, DEFAULT_BASE_URL, DEFAULT_RESOURCE};
pub use cursor::PaginationCursor;
pub use search::SearchQuery;
pub use throttle::AlertThrottle;
