//! A monotone wall-clock abstraction.
//!
//! Rate limiting, retry backoff and lock expiry all reason about "seconds
//! since some reference point" rather than calendar time. Routing that
//! through a trait lets tests swap in a [`FakeClock`]-style stand-in
//! instead of sleeping for real.

use std::time::{SystemTime, UNIX_EPOCH};

/// Source of monotone wall-clock time.
///
/// Implementations must never go backwards within a process lifetime.
pub trait Clock: Send + Sync {
    /// Current time in whole seconds since the Unix epoch.
    fn now_secs(&self) -> u64;

    /// Current time in milliseconds since the Unix epoch.
    fn now_millis(&self) -> u64 {
        self.now_secs().saturating_mul(1000)
    }
}

/// The real system clock, backed by [`SystemTime::now`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_secs(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }

    fn now_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
            .unwrap_or(0)
    }
}
