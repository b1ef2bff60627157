//! Collaborator traits for Catadex.
//!
//! The fetch layer talks to the outside world through these seams so that
//! presentation and time can be swapped out in tests.

use std::time::Instant;

/// Presents a user-facing alert.
///
/// Fire-and-forget: implementations must not block and have no result.
pub trait Notifier: Send + Sync {
    /// Shows an alert with a title and a message.
    fn notify(&self, title: &str, message: &str);
}

/// Source of monotonic time.
pub trait Clock: Send + Sync {
    /// Returns the current instant.
    fn now(&self) -> Instant;
}

/// Clock backed by [`Instant::now`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}
