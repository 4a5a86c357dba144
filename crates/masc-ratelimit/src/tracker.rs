//! Per-session sliding-window + burst rate tracking.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use crate::error::{RateError, RateResult};
use crate::types::{Category, RateLimitConfig};

#[derive(Debug, Default)]
struct CategoryWindow {
    timestamps: VecDeque<u64>,
}

impl CategoryWindow {
    fn trim(&mut self, now: u64, window_sec: u64) {
        while let Some(&oldest) = self.timestamps.front() {
            if now.saturating_sub(oldest) >= window_sec {
                self.timestamps.pop_front();
            } else {
                break;
            }
        }
    }
}

struct Inner {
    windows: HashMap<Category, CategoryWindow>,
    burst_used: u32,
    last_burst_reset: u64,
}

/// A single session's sliding-window counters across the three rate
/// categories, plus a shared burst allowance.
///
/// All mutation goes through [`RateTracker::check_and_record`], which
/// drops expired timestamps, tests the window and burst allowances, and
/// (on success) records the new event — matching §4.6's four-step
/// contract.
pub struct RateTracker {
    inner: Mutex<Inner>,
}

impl RateTracker {
    /// Creates a tracker with empty windows and a full burst allowance.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                windows: HashMap::new(),
                burst_used: 0,
                last_burst_reset: 0,
            }),
        }
    }

    /// Checks whether an event in `category` is allowed at `now` (Unix
    /// seconds) against `config`, recording it if so.
    ///
    /// # Errors
    ///
    /// Returns [`RateError::RateLimited`] if both the sliding window and
    /// the burst allowance are exhausted.
    pub fn check_and_record(
        &self,
        category: Category,
        now: u64,
        config: &RateLimitConfig,
    ) -> RateResult<()> {
        let mut guard = self.inner.lock().unwrap_or_else(|e| e.into_inner());

        if now.saturating_sub(guard.last_burst_reset) >= config.burst_window_sec {
            guard.burst_used = 0;
            guard.last_burst_reset = now;
        }

        let window = guard.windows.entry(category).or_default();
        window.trim(now, config.window_sec);
        let count = u32::try_from(window.timestamps.len()).unwrap_or(u32::MAX);
        let limit = config.limit(category);

        if count < limit {
            window.timestamps.push_back(now);
            return Ok(());
        }

        if guard.burst_used < config.burst_limit {
            guard.burst_used = guard.burst_used.saturating_add(1);
            let window = guard.windows.entry(category).or_default();
            window.timestamps.push_back(now);
            return Ok(());
        }

        let oldest = guard
            .windows
            .get(&category)
            .and_then(|w| w.timestamps.front().copied())
            .unwrap_or(now);
        let retry_after_sec = config.window_sec.saturating_sub(now.saturating_sub(oldest));
        Err(RateError::RateLimited {
            category,
            retry_after_sec,
        })
    }
}

impl Default for RateTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> RateLimitConfig {
        RateLimitConfig {
            general_limit: 2,
            broadcast_limit: 1,
            task_ops_limit: 1,
            window_sec: 10,
            burst_limit: 1,
            burst_window_sec: 5,
        }
    }

    #[test]
    fn allows_within_window_limit() {
        let tracker = RateTracker::new();
        let cfg = config();
        assert!(tracker.check_and_record(Category::General, 0, &cfg).is_ok());
        assert!(tracker.check_and_record(Category::General, 1, &cfg).is_ok());
    }

    #[test]
    fn denies_past_window_and_burst() {
        let tracker = RateTracker::new();
        let cfg = config();
        tracker.check_and_record(Category::General, 0, &cfg).unwrap();
        tracker.check_and_record(Category::General, 1, &cfg).unwrap();
        // Third within window uses the one burst slot.
        assert!(tracker.check_and_record(Category::General, 2, &cfg).is_ok());
        // Fourth has no window or burst room left.
        assert!(matches!(
            tracker.check_and_record(Category::General, 3, &cfg),
            Err(RateError::RateLimited { .. })
        ));
    }

    #[test]
    fn window_expiry_frees_capacity() {
        let tracker = RateTracker::new();
        let cfg = config();
        tracker.check_and_record(Category::General, 0, &cfg).unwrap();
        tracker.check_and_record(Category::General, 1, &cfg).unwrap();
        assert!(tracker.check_and_record(Category::General, 11, &cfg).is_ok());
    }

    #[test]
    fn categories_are_independent() {
        let tracker = RateTracker::new();
        let cfg = config();
        tracker.check_and_record(Category::Broadcast, 0, &cfg).unwrap();
        assert!(tracker.check_and_record(Category::TaskOps, 0, &cfg).is_ok());
    }

    #[test]
    fn burst_resets_after_its_own_window() {
        let tracker = RateTracker::new();
        let cfg = config();
        tracker.check_and_record(Category::General, 0, &cfg).unwrap();
        tracker.check_and_record(Category::General, 1, &cfg).unwrap();
        tracker.check_and_record(Category::General, 2, &cfg).unwrap(); // burst slot used
        // Burst window (5s) elapses before the main window (10s) does.
        assert!(tracker.check_and_record(Category::General, 8, &cfg).is_ok());
    }
}
