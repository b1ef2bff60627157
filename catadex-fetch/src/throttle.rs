//! Rate limiting for user-facing alerts.
//!
//! When a batch of detail fetches fails together, each failure would
//! otherwise raise its own alert. The throttle lets one through per
//! cooldown window and drops the rest.

use catadex_core::{Clock, Notifier, SystemClock};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};
use tracing::debug;

/// Default cooldown between two alerts.
pub const DEFAULT_COOLDOWN: Duration = Duration::from_millis(3000);

/// Forwards at most one alert per cooldown window to a [`Notifier`].
///
/// Coarse on purpose: it does not look at what failed, only at when the
/// last alert went out.
pub struct AlertThrottle {
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
    cooldown: Duration,
    last_notified: Mutex<Option<Instant>>,
}

impl AlertThrottle {
    /// Creates a throttle using the system clock and the default cooldown.
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self::with_clock(notifier, Arc::new(SystemClock), DEFAULT_COOLDOWN)
    }

    /// Creates a throttle with an explicit clock and cooldown.
    pub fn with_clock(notifier: Arc<dyn Notifier>, clock: Arc<dyn Clock>, cooldown: Duration) -> Self {
        Self {
            notifier,
            clock,
            cooldown,
            last_notified: Mutex::new(None),
        }
    }

    /// Returns the cooldown window.
    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }

    /// Notifies unless another alert went out within the cooldown window.
    ///
    /// Returns true if the notifier was called.
    pub fn notify_once(&self, title: &str, message: &str) -> bool {
        let now = self.clock.now();
        {
            let mut last = self
                .last_notified
                .lock()
                .unwrap_or_else(PoisonError::into_inner);

            if let Some(previous) = *last {
                if now.saturating_duration_since(previous) <= self.cooldown {
                    debug!(title, "Alert suppressed by cooldown");
                    return false;
                }
            }
            *last = Some(now);
        }

        self.notifier.notify(title, message);
        true
    }
}

impl std::fmt::Debug for AlertThrottle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlertThrottle")
            .field("cooldown", &self.cooldown)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================
