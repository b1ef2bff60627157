//! HTTP client with tracing and domain allowlist.
//!
//! This module provides the single-request primitive used by everything
//! above it: one GET, JSON decode, non-2xx mapped to an error. It adds:
//! - Request/response tracing
//! - Domain allowlist for security
//!
//! Retries and deadlines belong to callers (see [`crate::retry`]).

use async_trait::async_trait;
use reqwest::{Client, header};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

use crate::error::FetchError;

/// Safety-net timeout for the underlying transport.
///
/// The per-attempt deadline is enforced by the retry controller; this only
/// guards against sockets that never resolve when the client is used alone.
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// User agent string for Catadex.
const USER_AGENT: &str = concat!("Catadex/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// Json Fetcher
// ============================================================================

/// Something that can GET a URL and hand back its JSON body.
///
/// [`HttpClient`] is the production implementation; tests script their own.
#[async_trait]
pub trait JsonFetcher: Send + Sync {
    /// Fetches `url` and decodes the body as JSON.
    async fn fetch_json(&self, url: &str) -> Result<Value, FetchError>;
}

// ============================================================================
// HTTP Client
// ============================================================================

/// HTTP client wrapper with tracing and domain allowlist.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: Client,
    allowed_domains: Option<Vec<String>>,
}

impl HttpClient {
    /// Creates a new HTTP client with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialized.
    pub fn new() -> Result<Self, FetchError> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Creates a new HTTP client with a custom transport timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialized.
    pub fn with_timeout(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| FetchError::Network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            inner: client,
            allowed_domains: None,
        })
    }

    /// Restricts requests to the given domains (and their subdomains).
    #[must_use]
    pub fn with_allowed_domains(mut self, domains: Vec<String>) -> Self {
        self.allowed_domains = Some(domains);
        self
    }

    /// Parses the URL and checks its domain against the allowlist.
    fn check_url(&self, url: &str) -> Result<(), FetchError> {
        let parsed = Url::parse(url).map_err(|e| FetchError::InvalidUrl(format!("{url}: {e}")))?;

        let Some(ref allowed) = self.allowed_domains else {
            return Ok(()); // No restrictions
        };

        let host = parsed
            .host_str()
            .ok_or_else(|| FetchError::InvalidUrl("No host in URL".to_string()))?;

        let allowed = allowed
            .iter()
            .any(|domain| host == domain || host.ends_with(&format!(".{domain}")));

        if allowed {
            Ok(())
        } else {
            Err(FetchError::DomainNotAllowed(host.to_string()))
        }
    }

    /// Performs a GET request and decodes the JSON body.
    ///
    /// # Errors
    ///
    /// - [`FetchError::InvalidUrl`] / [`FetchError::DomainNotAllowed`] before sending
    /// - [`FetchError::Network`] when the transport fails
    /// - [`FetchError::Http`] for a non-2xx status
    /// - [`FetchError::Json`] when the body is not JSON
    #[instrument(skip(self), fields(url = %url))]
    pub async fn get_json(&self, url: &str) -> Result<Value, FetchError> {
        self.check_url(url)?;
        debug!("GET request");

        let response = self
            .inner
            .get(url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        debug!(status = %status, "Response received");

        if !status.is_success() {
            return Err(FetchError::Http {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl JsonFetcher for HttpClient {
    async fn fetch_json(&self, url: &str) -> Result<Value, FetchError> {
        self.get_json(url).await
    }
}

// ============================================================================
// Tests
// ============================================================================
