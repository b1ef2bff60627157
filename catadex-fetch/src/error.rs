//! Fetch error types.

use thiserror::Error;

// ============================================================================
// Main Fetch Error
// ============================================================================

/// Error type for fetch operations.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The transport failed (DNS, connection reset, TLS).
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a non-success status.
    #[error("HTTP {status} {status_text}")]
    Http {
        /// Status code.
        status: u16,
        /// Canonical reason phrase.
        status_text: String,
    },

    /// The per-attempt deadline elapsed.
    #[error("Request timed out after {duration_ms} ms")]
    Timeout {
        /// Deadline that elapsed, in milliseconds.
        duration_ms: u64,
    },

    /// Response body is not JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// JSON did not have the expected shape.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Domain not allowed.
    #[error("Domain not allowed: {0}")]
    DomainNotAllowed(String),

    /// The searched item does not exist upstream.
    #[error("Item not found: {0}")]
    NotFound(String),

    /// Search input was empty or malformed.
    #[error("Invalid search query: {0}")]
    InvalidQuery(String),

    /// Every attempt failed; carries the last error.
    #[error("Request failed after {attempts} attempts: {source}")]
    RetryExhausted {
        /// Number of attempts made.
        attempts: u32,
        /// The error of the final attempt.
        #[source]
        source: Box<FetchError>,
    },

    /// A page load failed as a whole.
    #[error("Failed to load page at offset {offset}: {source}")]
    Aggregation {
        /// Offset of the page that failed.
        offset: u32,
        /// Underlying failure.
        #[source]
        source: Box<FetchError>,
    },

    /// Core error.
    #[error("Core error: {0}")]
    Core(#[from] catadex_core::CoreError),
}

impl FetchError {
    /// Returns true if another attempt might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            FetchError::Network(_) | FetchError::Http { .. } | FetchError::Timeout { .. }
        )
    }

    /// Returns the HTTP status behind this error, looking through wrappers.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Http { status, .. } => Some(*status),
            FetchError::RetryExhausted { source, .. } | FetchError::Aggregation { source, .. } => {
                source.status()
            }
            _ => None,
        }
    }

    /// Returns the number of attempts recorded by the retry controller, if any.
    pub fn attempts(&self) -> Option<u32> {
        match self {
            FetchError::RetryExhausted { attempts, .. } => Some(*attempts),
            FetchError::Aggregation { source, .. } => source.attempts(),
            _ => None,
        }
    }

    /// Returns a short message safe to show to users.
    pub fn user_message(&self) -> &'static str {
        match self {
            FetchError::NotFound(_) => "Item not found. Check the name or number and try again.",
            FetchError::InvalidQuery(_) => "Type a name or number to search.",
            FetchError::Aggregation { .. } => "Could not load the catalog. Try again later.",
            _ => "Something went wrong while talking to the catalog.",
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return FetchError::Http {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
            };
        }
        FetchError::Network(err.to_string())
    }
}
