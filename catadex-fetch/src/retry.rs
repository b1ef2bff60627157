//! Retry policy and controller for catalog requests.
//!
//! Every attempt runs under [`with_timeout`]. Failed attempts back off for
//! `base * 2^attempt` plus a random jitter before the next try.

use rand::Rng;
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::FetchError;
use crate::host::JsonFetcher;
use crate::timeout::{duration_ms, with_timeout};

/// Upper bound for the exponential part of the backoff.
const MAX_BACKOFF: Duration = Duration::from_secs(60);

// ============================================================================
// Retry Policy
// ============================================================================

/// Policy for retrying failed requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Backoff before the first retry.
    pub base_delay: Duration,
    /// Upper bound of the uniform random jitter added to each backoff.
    pub max_jitter: Duration,
    /// Deadline for a single attempt.
    pub attempt_timeout: Duration,
}

impl RetryPolicy {
    /// Creates a policy with the given retry count and default timings.
    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            base_delay: Duration::from_secs(1),
            max_jitter: Duration::from_secs(1),
            attempt_timeout: Duration::from_secs(15),
        }
    }

    /// Disables retries.
    pub fn no_retry() -> Self {
        Self {
            max_retries: 0,
            base_delay: Duration::ZERO,
            max_jitter: Duration::ZERO,
            ..Self::default()
        }
    }

    /// Sets the base delay.
    #[must_use]
    pub fn with_base_delay(mut self, delay: Duration) -> Self {
        self.base_delay = delay;
        self
    }

    /// Sets the jitter ceiling.
    #[must_use]
    pub fn with_max_jitter(mut self, jitter: Duration) -> Self {
        self.max_jitter = jitter;
        self
    }

    /// Sets the per-attempt deadline.
    #[must_use]
    pub fn with_attempt_timeout(mut self, timeout: Duration) -> Self {
        self.attempt_timeout = timeout;
        self
    }

    /// Total number of attempts, including the first.
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Exponential part of the delay after the zero-based `attempt` failed.
    pub fn backoff_for_attempt(&self, attempt: u32) -> Duration {
        let factor = 2u32.checked_pow(attempt).unwrap_or(u32::MAX);
        self.base_delay
            .checked_mul(factor)
            .unwrap_or(MAX_BACKOFF)
            .min(MAX_BACKOFF)
    }

    /// Full delay after the zero-based `attempt` failed: backoff plus jitter.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        self.backoff_for_attempt(attempt) + random_jitter(self.max_jitter)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3)
    }
}

/// Uniform jitter in `[0, max]` at millisecond resolution.
fn random_jitter(max: Duration) -> Duration {
    let max_ms = duration_ms(max);
    if max_ms == 0 {
        return Duration::ZERO;
    }
    Duration::from_millis(rand::thread_rng().gen_range(0..=max_ms))
}

// ============================================================================
// Retry Controller
// ============================================================================

/// Applies a [`RetryPolicy`] around a [`JsonFetcher`].
#[derive(Clone)]
pub struct RetryController {
    fetcher: Arc<dyn JsonFetcher>,
    policy: RetryPolicy,
}

impl RetryController {
    /// Creates a controller.
    pub fn new(fetcher: Arc<dyn JsonFetcher>, policy: RetryPolicy) -> Self {
        Self { fetcher, policy }
    }

    /// Returns the active policy.
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Returns the underlying fetcher.
    pub fn fetcher(&self) -> &Arc<dyn JsonFetcher> {
        &self.fetcher
    }

    /// Fetches `url` with per-attempt timeout and bounded retries.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::RetryExhausted`] carrying the attempt count and
    /// the last error once all attempts failed, or the first non-retryable
    /// error unchanged.
    pub async fn fetch_with_retry(&self, url: &str) -> Result<Value, FetchError> {
        self.run(url, |_| self.fetcher.fetch_json(url)).await
    }

    /// Runs `op` until it succeeds or the policy gives up.
    ///
    /// `op` receives the zero-based attempt number. Loops at most
    /// `max_retries + 1` times.
    ///
    /// # Errors
    ///
    /// See [`RetryController::fetch_with_retry`].
    pub async fn run<T, F, Fut>(&self, label: &str, mut op: F) -> Result<T, FetchError>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, FetchError>>,
    {
        let max_attempts = self.policy.max_attempts();
        let mut attempt = 0;

        loop {
            let error = match with_timeout(op(attempt), self.policy.attempt_timeout).await {
                Ok(value) => {
                    if attempt > 0 {
                        debug!(url = %label, attempt, "Request succeeded after retry");
                    }
                    return Ok(value);
                }
                Err(e) if !e.is_retryable() => {
                    debug!(url = %label, attempt, error = %e, "Non-retryable failure");
                    return Err(e);
                }
                Err(e) => e,
            };

            let attempts = attempt + 1;
            if attempts >= max_attempts {
                warn!(url = %label, attempts, error = %error, "Retries exhausted");
                return Err(FetchError::RetryExhausted {
                    attempts,
                    source: Box::new(error),
                });
            }

            let delay = self.policy.delay_for_attempt(attempt);
            warn!(
                url = %label,
                attempt,
                delay_ms = duration_ms(delay),
                error = %error,
                "Request failed, retrying"
            );
            tokio::time::sleep(delay).await;
            attempt = attempts;
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
