//! Deadline wrapper for a single operation.

use std::future::Future;
use std::time::Duration;

use crate::error::FetchError;

/// Races `operation` against a timer.
///
/// When the deadline wins, the operation future is dropped, which aborts
/// any in-flight request it owns. No retry happens here.
///
/// # Errors
///
/// Returns [`FetchError::Timeout`] when `duration` elapses first, otherwise
/// whatever the operation returned.
pub async fn with_timeout<F, T>(operation: F, duration: Duration) -> Result<T, FetchError>
where
    F: Future<Output = Result<T, FetchError>>,
{
    match tokio::time::timeout(duration, operation).await {
        Ok(result) => result,
        Err(_) => Err(FetchError::Timeout {
            duration_ms: duration_ms(duration),
        }),
    }
}

/// Converts a duration to whole milliseconds, saturating.
pub(crate) fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
