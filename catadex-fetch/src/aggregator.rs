//! Paginated list aggregation.
//!
//! One call to [`ListAggregator::load_next_page`] fetches a page of
//! summaries, resolves each summary to its detail in fixed-size concurrent
//! batches, and merges the results into the session's accumulated set.
//! Individual detail failures are logged and dropped; only a failure of the
//! page request itself surfaces as an error.

use std::sync::Arc;

use catadex_core::ItemDetail;
use futures::future::join_all;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use crate::accumulator::AccumulatedSet;
use crate::api::CatalogApi;
use crate::cursor::PaginationCursor;
use crate::error::FetchError;
use crate::throttle::AlertThrottle;

/// Alert title used for all list-loading alerts.
pub const ALERT_TITLE: &str = "Catalog";

/// Alert raised when the upstream has no further items.
pub const ALERT_NO_MORE_ITEMS: &str = "No more items to load.";

/// Alert raised when none of a page's details could be fetched.
pub const ALERT_ITEMS_UNAVAILABLE: &str = "Could not load items. Try again in a moment.";

// ============================================================================
// Configuration
// ============================================================================

/// Paging and batching parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregatorConfig {
    /// Summaries requested per page.
    pub page_size: u32,
    /// Detail requests issued concurrently.
    pub batch_size: usize,
}

impl AggregatorConfig {
    /// Creates a config. Zero values are raised to 1.
    pub fn new(page_size: u32, batch_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            batch_size: batch_size.max(1),
        }
    }
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self::new(20, 5)
    }
}

// ============================================================================
// Aggregator
// ============================================================================

#[derive(Debug)]
struct SessionState {
    cursor: PaginationCursor,
    items: AccumulatedSet,
}

/// Loads the catalog page by page into one ordered, deduplicated list.
///
/// The session state lives behind an async mutex. A load holds it for its
/// whole duration, and a second load arriving meanwhile returns `Ok(0)`
/// instead of waiting.
pub struct ListAggregator {
    api: CatalogApi,
    throttle: Arc<AlertThrottle>,
    config: AggregatorConfig,
    state: Mutex<SessionState>,
}

impl ListAggregator {
    /// Creates an aggregator with an empty session.
    pub fn new(api: CatalogApi, throttle: Arc<AlertThrottle>, config: AggregatorConfig) -> Self {
        Self {
            api,
            throttle,
            config,
            state: Mutex::new(SessionState {
                cursor: PaginationCursor::new(config.page_size),
                items: AccumulatedSet::new(),
            }),
        }
    }

    /// Returns the paging configuration.
    pub fn config(&self) -> AggregatorConfig {
        self.config
    }

    /// Returns the catalog API.
    pub fn api(&self) -> &CatalogApi {
        &self.api
    }

    /// Returns the alert throttle shared by this session.
    pub fn alerts(&self) -> &Arc<AlertThrottle> {
        &self.throttle
    }

    /// Loads the next page and returns how many new items were merged.
    ///
    /// Returns `Ok(0)` without any request when the list is exhausted or
    /// another load is in flight. The cursor advances once at least one
    /// detail of the page was fetched, even if all of them were already
    /// known.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Aggregation`] when the page request fails after
    /// retries. Cursor and accumulated items are left untouched.
    #[instrument(skip(self))]
    pub async fn load_next_page(&self) -> Result<usize, FetchError> {
        let Ok(mut state) = self.state.try_lock() else {
            debug!("Load already in flight");
            return Ok(0);
        };
        if !state.cursor.has_more() {
            debug!("List exhausted");
            return Ok(0);
        }

        let (offset, limit) = state.cursor.list_query();
        let page = self
            .api
            .fetch_page(offset, limit)
            .await
            .map_err(|e| {
                warn!(offset, error = %e, "Page request failed");
                FetchError::Aggregation {
                    offset,
                    source: Box::new(e),
                }
            })?;

        if page.is_empty() {
            info!(offset, "Upstream returned an empty page");
            state.cursor.mark_exhausted();
            self.throttle.notify_once(ALERT_TITLE, ALERT_NO_MORE_ITEMS);
            return Ok(0);
        }

        let fetched = self.fetch_details(&page.results).await;
        if fetched.is_empty() {
            warn!(offset, summaries = page.results.len(), "No details could be fetched");
            self.throttle.notify_once(ALERT_TITLE, ALERT_ITEMS_UNAVAILABLE);
            return Ok(0);
        }

        let fetched_count = fetched.len();
        let merged = state.items.merge_all(fetched);
        let next_offset = state.cursor.advance();
        if !page.has_next() {
            state.cursor.mark_exhausted();
        }

        info!(
            offset,
            next_offset,
            fetched = fetched_count,
            merged,
            total = state.items.len(),
            has_more = state.cursor.has_more(),
            "Page loaded"
        );
        Ok(merged)
    }

    /// Fetches details in sequential batches; requests within a batch run
    /// concurrently. Failed items are dropped. Output keeps summary order.
    async fn fetch_details(&self, summaries: &[catadex_core::ItemSummary]) -> Vec<ItemDetail> {
        let mut fetched = Vec::with_capacity(summaries.len());

        for (index, batch) in summaries.chunks(self.config.batch_size).enumerate() {
            debug!(batch = index, size = batch.len(), "Fetching detail batch");
            let results = join_all(batch.iter().map(|s| self.api.fetch_detail_url(&s.url))).await;

            for (summary, result) in batch.iter().zip(results) {
                match result {
                    Ok(detail) => fetched.push(detail),
                    Err(e) => {
                        warn!(name = %summary.name, error = %e, "Dropping item after failed detail fetch");
                    }
                }
            }
        }

        fetched
    }

    /// Clears the session and returns to the first page.
    ///
    /// Waits for an in-flight load to finish first.
    pub async fn restart(&self) {
        let mut state = self.state.lock().await;
        state.cursor.reset();
        state.items.clear();
        debug!("Session restarted");
    }

    /// Merges a single detail fetched outside of paging.
    ///
    /// Returns true if it was new.
    pub async fn merge(&self, detail: ItemDetail) -> bool {
        self.state.lock().await.items.merge(detail)
    }

    /// Returns a snapshot of the accumulated items in discovery order.
    pub async fn items(&self) -> Vec<ItemDetail> {
        self.state.lock().await.items.as_slice().to_vec()
    }

    /// Number of accumulated items.
    pub async fn len(&self) -> usize {
        self.state.lock().await.items.len()
    }

    /// Returns true if nothing has been accumulated.
    pub async fn is_empty(&self) -> bool {
        self.state.lock().await.items.is_empty()
    }

    /// Returns a snapshot of the cursor.
    pub async fn cursor(&self) -> PaginationCursor {
        self.state.lock().await.cursor
    }
}

impl std::fmt::Debug for ListAggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListAggregator")
            .field("api", &self.api)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================
