//! Catalog REST endpoints.

use catadex_core::{ItemDetail, PageResponse};
use tracing::{debug, instrument};
use url::Url;

use crate::error::FetchError;
use crate::parser::{parse_detail, parse_page};
use crate::retry::RetryController;
use crate::search::SearchQuery;
use crate::timeout::with_timeout;

/// Default catalog base URL.
pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Default resource collection under the base URL.
pub const DEFAULT_RESOURCE: &str = "pokemon";

/// Typed access to the list and detail endpoints.
#[derive(Clone)]
pub struct CatalogApi {
    base_url: String,
    resource: String,
    retry: RetryController,
}

impl CatalogApi {
    /// Creates an API client for `base_url` using the default resource.
    pub fn new(base_url: impl Into<String>, retry: RetryController) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            resource: DEFAULT_RESOURCE.to_string(),
            retry,
        }
    }

    /// Overrides the resource collection name.
    #[must_use]
    pub fn with_resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = resource.into().trim_matches('/').to_string();
        self
    }

    /// Returns the base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the retry controller.
    pub fn retry(&self) -> &RetryController {
        &self.retry
    }

    /// URL of the list endpoint for one page.
    pub fn page_url(&self, offset: u32, limit: u32) -> String {
        format!(
            "{}/{}?offset={offset}&limit={limit}",
            self.base_url, self.resource
        )
    }

    /// URL of the detail endpoint for an id or name.
    ///
    /// The id or name becomes exactly one percent-encoded path segment, so
    /// `/`, `?` and `#` in user input cannot leave the resource collection.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidQuery`] for an empty or dot segment and
    /// [`FetchError::InvalidUrl`] when the base URL cannot carry a path.
    pub fn detail_url(&self, id_or_name: &str) -> Result<String, FetchError> {
        if matches!(id_or_name, "" | "." | "..") {
            return Err(FetchError::InvalidQuery(id_or_name.to_string()));
        }

        let invalid_base = || FetchError::InvalidUrl(self.base_url.clone());
        let mut url = Url::parse(&self.base_url).map_err(|_| invalid_base())?;
        url.path_segments_mut()
            .map_err(|()| invalid_base())?
            .pop_if_empty()
            .push(&self.resource)
            .push(id_or_name);
        Ok(url.into())
    }

    /// Fetches one page of summaries, with retries.
    ///
    /// # Errors
    ///
    /// Returns the retry controller's error or [`FetchError::InvalidResponse`].
    #[instrument(skip(self))]
    pub async fn fetch_page(&self, offset: u32, limit: u32) -> Result<PageResponse, FetchError> {
        let value = self
            .retry
            .fetch_with_retry(&self.page_url(offset, limit))
            .await?;
        parse_page(value)
    }

    /// Fetches a detail by id or name, with retries.
    ///
    /// # Errors
    ///
    /// Same as [`CatalogApi::fetch_detail_url`].
    pub async fn fetch_detail(&self, id_or_name: &str) -> Result<ItemDetail, FetchError> {
        self.fetch_detail_url(&self.detail_url(id_or_name)?).await
    }

    /// Fetches a detail from an absolute URL taken from a summary.
    ///
    /// # Errors
    ///
    /// Returns the retry controller's error, [`FetchError::InvalidResponse`],
    /// or a core validation error.
    pub async fn fetch_detail_url(&self, url: &str) -> Result<ItemDetail, FetchError> {
        let value = self.retry.fetch_with_retry(url).await?;
        parse_detail(value)
    }

    /// Looks up a single item.
    ///
    /// Makes one timed attempt without retries. A 404 means the item does
    /// not exist and is reported as [`FetchError::NotFound`].
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::NotFound`], [`FetchError::Timeout`], or the
    /// transport and parse errors of a single attempt.
    #[instrument(skip(self), fields(query = %query))]
    pub async fn search(&self, query: &SearchQuery) -> Result<ItemDetail, FetchError> {
        let url = self.detail_url(&query.path_segment())?;
        let attempt = self.retry.fetcher().fetch_json(&url);

        match with_timeout(attempt, self.retry.policy().attempt_timeout).await {
            Ok(value) => parse_detail(value),
            Err(FetchError::Http { status: 404, .. }) => {
                debug!("No match");
                Err(FetchError::NotFound(query.to_string()))
            }
            Err(e) => Err(e),
        }
    }
}

impl std::fmt::Debug for CatalogApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogApi")
            .field("base_url", &self.base_url)
            .field("resource", &self.resource)
            .field("policy", self.retry.policy())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::JsonFetcher;
    use crate::retry::RetryPolicy;
    use async_trait::async_trait;
    use serde_json::{Value, json};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    /// Answers from a fixed map; unknown URLs are 404.
    struct MapFetcher {
        responses: Vec<(String, Value)>,
        requested: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl JsonFetcher for MapFetcher {
        async fn fetch_json(&self, url: &str) -> Result<Value, FetchError> {
            self.requested.lock().unwrap().push(url.to_string());
            self.responses
                .iter()
                .find(|(u, _)| u == url)
                .map(|(_, v)| v.clone())
                .ok_or(FetchError::Http {
                    status: 404,
                    status_text: "Not Found".into(),
                })
        }
    }

    fn make_api(responses: Vec<(String, Value)>) -> (Arc<MapFetcher>, CatalogApi) {
        let fetcher = Arc::new(MapFetcher {
            responses,
            requested: Mutex::new(Vec::new()),
        });
        let policy = RetryPolicy::new(2)
            .with_base_delay(Duration::ZERO)
            .with_max_jitter(Duration::ZERO);
        let api = CatalogApi::new("https://api.test/v2/", RetryController::new(fetcher.clone(), policy));
        (fetcher, api)
    }

    #[test]
    fn test_urls() {
        let (_, api) = make_api(vec![]);
        assert_eq!(api.page_url(40, 20), "https://api.test/v2/pokemon?offset=40&limit=20");
        assert_eq!(api.detail_url("25").unwrap(), "https://api.test/v2/pokemon/25");

        let api = api.with_resource("/berry/");
        assert_eq!(api.detail_url("1").unwrap(), "https://api.test/v2/berry/1");
    }

    #[test]
    fn test_detail_url_keeps_name_in_one_segment() {
        let (_, api) = make_api(vec![]);

        assert_eq!(
            api.detail_url("a/../../berry/1").unwrap(),
            "https://api.test/v2/pokemon/a%2F..%2F..%2Fberry%2F1"
        );
        assert_eq!(api.detail_url("x?y#z").unwrap(), "https://api.test/v2/pokemon/x%3Fy%23z");
        assert!(matches!(api.detail_url(".."), Err(FetchError::InvalidQuery(_))));
        assert!(matches!(api.detail_url(""), Err(FetchError::InvalidQuery(_))));
    }

    #[tokio::test]
    async fn test_search_with_separator_stays_on_detail_endpoint() {
        let (fetcher, api) = make_api(vec![]);

        let err = api
            .search(&SearchQuery::ByName("x?limit=1".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::NotFound(_)));
        assert_eq!(
            *fetcher.requested.lock().unwrap(),
            vec!["https://api.test/v2/pokemon/x%3Flimit=1".to_string()]
        );
    }

    #[tokio::test]
    async fn test_search_hit() {
        let (_, api) = make_api(vec![(
            "https://api.test/v2/pokemon/pikachu".into(),
            json!({"id": 25, "name": "pikachu"}),
        )]);

        let detail = api
            .search(&SearchQuery::ByName("pikachu".into()))
            .await
            .unwrap();
        assert_eq!(detail.id, 25);
    }

    #[tokio::test]
    async fn test_search_miss_is_not_found_without_retry() {
        let (fetcher, api) = make_api(vec![]);

        let err = api.search(&SearchQuery::ById(9999)).await.unwrap_err();
        assert!(matches!(err, FetchError::NotFound(ref q) if q == "#9999"));
        assert_eq!(fetcher.requested.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_page_retries_404_then_exhausts() {
        let (fetcher, api) = make_api(vec![]);

        let err = api.fetch_page(0, 20).await.unwrap_err();
        assert_eq!(err.attempts(), Some(3));
        assert_eq!(fetcher.requested.lock().unwrap().len(), 3);
    }
}
