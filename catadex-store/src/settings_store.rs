//! User preferences store.
//!
//! Manages user settings with persistence.

use catadex_fetch::{AggregatorConfig, DEFAULT_BASE_URL, RetryPolicy};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::error::StoreError;
use crate::persistence::{default_settings_path, load_json, save_json};

// ============================================================================
// Settings Types
// ============================================================================

/// User preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Catalog API base URL.
    pub api_base_url: String,

    /// Items requested per page.
    pub page_size: u32,

    /// Detail requests issued concurrently.
    pub batch_size: usize,

    /// Deadline for a single request attempt.
    pub request_timeout_ms: u64,

    /// Retries after the first attempt.
    pub max_retries: u32,

    /// Backoff before the first retry.
    pub backoff_base_ms: u64,

    /// Upper bound of the random jitter added to each backoff.
    pub max_jitter_ms: u64,

    /// Minimum gap between two alerts.
    pub alert_cooldown_ms: u64,

    /// Log level.
    pub log_level: LogLevel,

    /// Hosts requests may go to (subdomains included). Empty allows any.
    pub allowed_domains: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            page_size: 20,
            batch_size: 5,
            request_timeout_ms: 15_000,
            max_retries: 3,
            backoff_base_ms: 1_000,
            max_jitter_ms: 1_000,
            alert_cooldown_ms: 3_000,
            log_level: LogLevel::default(),
            allowed_domains: Vec::new(),
        }
    }
}

impl Settings {
    /// Retry policy for catalog requests.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_retries)
            .with_base_delay(Duration::from_millis(self.backoff_base_ms))
            .with_max_jitter(Duration::from_millis(self.max_jitter_ms))
            .with_attempt_timeout(Duration::from_millis(self.request_timeout_ms))
    }

    /// Paging configuration for the list aggregator.
    pub fn aggregator_config(&self) -> AggregatorConfig {
        AggregatorConfig::new(self.page_size, self.batch_size)
    }

    /// Alert cooldown as a duration.
    pub fn alert_cooldown(&self) -> Duration {
        Duration::from_millis(self.alert_cooldown_ms)
    }

    /// Sets a field from its serialized name and a string value.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Config`] for an unknown key or a value that
    /// does not parse for that key.
    pub fn set_field(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        fn parse<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, StoreError> {
            value
                .trim()
                .parse()
                .map_err(|_| StoreError::Config(format!("invalid value for {key}: {value}")))
        }

        match key {
            "api_base_url" => {
                let url = value.trim().trim_end_matches('/');
                if !(url.starts_with("http://") || url.starts_with("https://")) {
                    return Err(StoreError::Config(format!("invalid value for {key}: {value}")));
                }
                self.api_base_url = url.to_string();
            }
            "page_size" => self.page_size = parse::<u32>(key, value)?.max(1),
            "batch_size" => self.batch_size = parse::<usize>(key, value)?.max(1),
            "request_timeout_ms" => self.request_timeout_ms = parse(key, value)?,
            "max_retries" => self.max_retries = parse(key, value)?,
            "backoff_base_ms" => self.backoff_base_ms = parse(key, value)?,
            "max_jitter_ms" => self.max_jitter_ms = parse(key, value)?,
            "alert_cooldown_ms" => self.alert_cooldown_ms = parse(key, value)?,
            "log_level" => self.log_level = parse(key, value)?,
            "allowed_domains" => {
                self.allowed_domains = value
                    .split(',')
                    .map(|d| d.trim().trim_start_matches('.').to_ascii_lowercase())
                    .filter(|d| !d.is_empty())
                    .collect();
            }
            _ => return Err(StoreError::Config(format!("unknown setting: {key}"))),
        }
        Ok(())
    }
}

/// Log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    /// Error level logging.
    Error,
    /// Warning level logging.
    #[default]
    Warn,
    /// Info level logging.
    Info,
    /// Debug level logging.
    Debug,
    /// Trace level logging.
    Trace,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Error => write!(f, "error"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Trace => write!(f, "trace"),
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            other => Err(StoreError::Config(format!("unknown log level: {other}"))),
        }
    }
}

// ============================================================================
// Settings Store
// ============================================================================

/// Persistent settings store.
pub struct SettingsStore {
    settings: Arc<RwLock<Settings>>,
    path: PathBuf,
}

impl SettingsStore {
    /// Creates a store holding defaults.
    pub fn new(path: PathBuf) -> Self {
        Self::with_settings(path, Settings::default())
    }

    fn with_settings(path: PathBuf, settings: Settings) -> Self {
        Self {
            settings: Arc::new(RwLock::new(settings)),
            path,
        }
    }

    /// Loads settings from the default path.
    pub async fn load_default() -> Self {
        Self::load(default_settings_path()).await
    }

    /// Loads settings from a path.
    ///
    /// A missing or corrupt file yields defaults.
    pub async fn load(path: PathBuf) -> Self {
        let settings = if path.exists() {
            info!(path = %path.display(), "Loading settings");
            load_json(&path).await.unwrap_or_else(|e| {
                warn!(error = %e, "Failed to load settings, using defaults");
                Settings::default()
            })
        } else {
            debug!(path = %path.display(), "Settings file not found, using defaults");
            Settings::default()
        };

        Self::with_settings(path, settings)
    }

    /// Returns the settings file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Gets a copy of the current settings.
    pub async fn get(&self) -> Settings {
        self.settings.read().await.clone()
    }

    /// Updates settings in memory.
    pub async fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut Settings),
    {
        let mut settings = self.settings.write().await;
        f(&mut settings);
    }

    /// Sets one field by name, then saves.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Config`] for a bad key or value, or a write
    /// error. Nothing changes on error.
    pub async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        {
            let mut settings = self.settings.write().await;
            let mut updated = settings.clone();
            updated.set_field(key, value)?;
            *settings = updated;
        }
        self.save().await
    }

    /// Restores defaults, then saves.
    ///
    /// # Errors
    ///
    /// Returns error if settings cannot be written to disk.
    pub async fn reset(&self) -> Result<(), StoreError> {
        self.update(|s| *s = Settings::default()).await;
        self.save().await
    }

    /// Saves settings to disk.
    ///
    /// # Errors
    ///
    /// Returns error if settings cannot be written to disk.
    pub async fn save(&self) -> Result<(), StoreError> {
        let settings = self.settings.read().await;
        save_json(&self.path, &*settings).await?;
        info!(path = %self.path.display(), "Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.api_base_url, "https://pokeapi.co/api/v2");
        assert_eq!(settings.page_size, 20);
        assert_eq!(settings.batch_size, 5);
        assert_eq!(settings.log_level, LogLevel::Warn);
    }

    #[test]
    fn test_retry_policy_conversion() {
        let policy = Settings::default().retry_policy();
        assert_eq!(policy.max_retries, 3);
        assert_eq!(policy.base_delay, Duration::from_secs(1));
        assert_eq!(policy.max_jitter, Duration::from_secs(1));
        assert_eq!(policy.attempt_timeout, Duration::from_secs(15));
    }

    #[test]
    fn test_aggregator_config_conversion() {
        let config = Settings::default().aggregator_config();
        assert_eq!(config, AggregatorConfig::new(20, 5));
    }

    #[test]
    fn test_set_field() {
        let mut settings = Settings::default();
        settings.set_field("page_size", "50").unwrap();
        settings.set_field("log_level", "DEBUG").unwrap();
        settings.set_field("api_base_url", "http://localhost:8080/api/").unwrap();

        assert_eq!(settings.page_size, 50);
        assert_eq!(settings.log_level, LogLevel::Debug);
        assert_eq!(settings.api_base_url, "http://localhost:8080/api");
    }

    #[test]
    fn test_set_allowed_domains() {
        let mut settings = Settings::default();
        settings.set_field("allowed_domains", " PokeAPI.co, .example.org ,,").unwrap();
        assert_eq!(settings.allowed_domains, vec!["pokeapi.co", "example.org"]);

        settings.set_field("allowed_domains", "").unwrap();
        assert!(settings.allowed_domains.is_empty());
    }

    #[test]
    fn test_set_field_rejects_bad_input() {
        let mut settings = Settings::default();
        assert!(settings.set_field("page_size", "lots").is_err());
        assert!(settings.set_field("color", "blue").is_err());
        assert!(settings.set_field("api_base_url", "ftp://x").is_err());
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"page_size": 10}"#).unwrap();
        assert_eq!(settings.page_size, 10);
        assert_eq!(settings.max_retries, 3);
    }

    #[tokio::test]
    async fn test_set_persists() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        let store = SettingsStore::new(path.clone());

        store.set("max_retries", "5").await.unwrap();

        let reloaded = SettingsStore::load(path).await;
        assert_eq!(reloaded.get().await.max_retries, 5);
    }

    #[tokio::test]
    async fn test_failed_set_changes_nothing() {
        let dir = TempDir::new().unwrap();
        let store = SettingsStore::new(dir.path().join("settings.json"));

        assert!(store.set("batch_size", "-1").await.is_err());
        assert_eq!(store.get().await, Settings::default());
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn test_reset() {
        let dir = TempDir::new().unwrap();
        let store = SettingsStore::new(dir.path().join("settings.json"));
        store.set("page_size", "7").await.unwrap();

        store.reset().await.unwrap();
        assert_eq!(store.get().await, Settings::default());
    }
}
