//! Wiring shared by commands: settings, local stores, and the catalog client.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use catadex_core::{Session, SystemClock};
use catadex_fetch::{AlertThrottle, CatalogApi, HttpClient, ListAggregator, RetryController};
use catadex_store::{
    AuthStore, FavoriteStore, FileKeyValueStore, Settings, default_store_path,
};
use tracing::debug;

use crate::Cli;
use crate::notifier::StderrNotifier;

/// Returned when a command needs a signed-in account.
#[derive(Debug)]
pub struct SessionRequired;

impl std::fmt::Display for SessionRequired {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("not signed in; run `catadex login` first")
    }
}

impl std::error::Error for SessionRequired {}

/// Everything a command may need, built from settings and the data file.
pub struct AppContext {
    pub settings: Settings,
    pub auth: AuthStore,
    pub favorites: FavoriteStore,
    throttle: Arc<AlertThrottle>,
}

impl AppContext {
    /// Opens the default data file.
    pub async fn load(cli: &Cli, settings: Settings) -> Self {
        Self::open(cli, settings, default_store_path()).await
    }

    /// Opens the stores at `store_path` with explicit settings.
    pub async fn open(cli: &Cli, settings: Settings, store_path: PathBuf) -> Self {
        let kv = Arc::new(FileKeyValueStore::open(store_path).await);
        let notifier = Arc::new(StderrNotifier::new(!cli.no_color, cli.quiet));
        let throttle = Arc::new(AlertThrottle::with_clock(
            notifier,
            Arc::new(SystemClock),
            settings.alert_cooldown(),
        ));

        Self {
            auth: AuthStore::new(kv.clone()),
            favorites: FavoriteStore::new(kv),
            settings,
            throttle,
        }
    }

    /// Returns the active session or [`SessionRequired`].
    pub async fn require_session(&self) -> Result<Session> {
        self.auth
            .current_session()
            .await?
            .ok_or_else(|| SessionRequired.into())
    }

    /// Builds a catalog client from settings.
    pub fn catalog(&self) -> Result<CatalogApi> {
        let mut http = HttpClient::new().context("failed to create HTTP client")?;
        if !self.settings.allowed_domains.is_empty() {
            http = http.with_allowed_domains(self.settings.allowed_domains.clone());
        }
        let retry = RetryController::new(Arc::new(http), self.settings.retry_policy());
        debug!(base_url = %self.settings.api_base_url, "Catalog client ready");
        Ok(CatalogApi::new(self.settings.api_base_url.clone(), retry))
    }

    /// Builds a list aggregator, optionally overriding the page size.
    pub fn aggregator(&self, page_size: Option<u32>) -> Result<ListAggregator> {
        let mut config = self.settings.aggregator_config();
        if let Some(size) = page_size {
            config.page_size = size.max(1);
        }
        Ok(ListAggregator::new(self.catalog()?, self.throttle.clone(), config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catadex_fetch::{FetchError, SearchQuery};
    use clap::Parser;

    #[tokio::test]
    async fn test_require_session_without_login() {
        let dir = tempfile::tempdir().unwrap();
        let cli = Cli::parse_from(["catadex", "whoami"]);
        let ctx = AppContext::open(&cli, Settings::default(), dir.path().join("store.json")).await;

        let err = ctx.require_session().await.unwrap_err();
        assert!(err.downcast_ref::<SessionRequired>().is_some());
    }

    #[tokio::test]
    async fn test_aggregator_page_size_override() {
        let dir = tempfile::tempdir().unwrap();
        let cli = Cli::parse_from(["catadex", "browse"]);
        let ctx = AppContext::open(&cli, Settings::default(), dir.path().join("store.json")).await;

        let aggregator = ctx.aggregator(Some(50)).unwrap();
        assert_eq!(aggregator.config().page_size, 50);
        assert_eq!(aggregator.config().batch_size, 5);
        assert_eq!(aggregator.alerts().cooldown(), ctx.settings.alert_cooldown());
    }

    #[tokio::test]
    async fn test_catalog_applies_allowed_domains() {
        let dir = tempfile::tempdir().unwrap();
        let cli = Cli::parse_from(["catadex", "show", "1"]);
        let settings = Settings {
            api_base_url: "https://catalog.invalid/api/v2".to_string(),
            allowed_domains: vec!["pokeapi.co".to_string()],
            ..Settings::default()
        };
        let ctx = AppContext::open(&cli, settings, dir.path().join("store.json")).await;

        let err = ctx
            .catalog()
            .unwrap()
            .search(&SearchQuery::ById(1))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::DomainNotAllowed(ref host) if host == "catalog.invalid"));
    }
}
