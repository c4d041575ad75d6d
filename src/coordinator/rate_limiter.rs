// ABOUTME: Minimum-interval rate limiter shared by all search workers.
// ABOUTME: One mutex covers read-last, wait, and record-new for every acquisition.

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

/// Error returned when a rate limiter operation is cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cancelled;

impl std::fmt::Display for Cancelled {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "operation cancelled")
    }
}

impl std::error::Error for Cancelled {}

/// Rate limiter enforcing a minimum spacing between acquisitions.
///
/// No two successful acquisitions, from any number of callers, are ever
/// closer together than `min_interval`. Callers queue on the internal mutex
/// and the holder sleeps while holding it, so the wait window computed by one
/// caller can never overlap another's.
///
/// Time comes from `tokio::time`, so tests can drive it with a paused clock.
pub struct RateLimiter {
    last: Mutex<Option<Instant>>,
    min_interval: Duration,
}

impl RateLimiter {
    /// Create a limiter. A zero interval disables spacing.
    pub fn new(min_interval: Duration) -> Self {
        Self {
            last: Mutex::new(None),
            min_interval,
        }
    }

    /// The configured minimum spacing.
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Wait until `min_interval` has passed since the previous acquisition,
    /// then record this one. The first acquisition never waits.
    pub async fn acquire(&self) {
        let mut last = self.last.lock().await;
        if let Some(previous) = *last {
            tokio::time::sleep_until(previous + self.min_interval).await;
        }
        *last = Some(Instant::now());
    }

    /// Acquire with cancellation support.
    ///
    /// Returns `Err(Cancelled)` if `cancel` completes first. A cancelled
    /// acquisition records nothing, so it does not push back later callers.
    pub async fn acquire_with_cancel<F>(&self, cancel: F) -> Result<(), Cancelled>
    where
        F: std::future::Future<Output = ()>,
    {
        tokio::pin!(cancel);

        tokio::select! {
            biased;
            () = &mut cancel => Err(Cancelled),
            () = self.acquire() => Ok(()),
        }
    }

    /// Time of the most recent acquisition (for testing/monitoring).
    pub async fn last_acquired(&self) -> Option<Instant> {
        *self.last.lock().await
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}
