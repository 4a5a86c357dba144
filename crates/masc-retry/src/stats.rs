//! Aggregate counters across the retry layer: total attempts made and the
//! status of every circuit breaker.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

use crate::circuit::{CircuitBreakerTable, CircuitStatus};

/// Snapshot returned by [`RetryStats::get_stats`].
#[derive(Debug, Clone, Serialize)]
pub struct StatsSnapshot {
    /// Total attempts made across every `with_retry` call tracked by this
    /// stats instance.
    pub total_attempts: u64,
    /// Current status of every circuit breaker that has recorded an
    /// attempt, keyed by name.
    pub circuit_breakers: HashMap<String, CircuitStatus>,
}

/// Tracks the total attempt count alongside a [`CircuitBreakerTable`], for
/// reporting via a `retry_stats`-style tool.
pub struct RetryStats {
    total_attempts: AtomicU64,
}

impl RetryStats {
    /// Creates a fresh, zeroed counter.
    #[must_use]
    pub fn new() -> Self {
        Self {
            total_attempts: AtomicU64::new(0),
        }
    }

    /// Records that one more attempt was made (by any operation, retried or
    /// not).
    pub fn record_attempt(&self) {
        self.total_attempts.fetch_add(1, Ordering::Relaxed);
    }

    /// Returns a consistent snapshot of attempt count and breaker statuses.
    #[must_use]
    pub fn get_stats(&self, breakers: &CircuitBreakerTable) -> StatsSnapshot {
        let circuit_breakers = breakers
            .all_statuses()
            .into_iter()
            .map(|status| (status.name.clone(), status))
            .collect();
        StatsSnapshot {
            total_attempts: self.total_attempts.load(Ordering::Relaxed),
            circuit_breakers,
        }
    }

    /// Resets the attempt counter to zero. Does not touch circuit breaker
    /// state; use [`CircuitBreakerTable::reset_circuit_breaker`] for that.
    pub fn reset_stats(&self) {
        self.total_attempts.store(0, Ordering::Relaxed);
    }
}

impl Default for RetryStats {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_attempts_and_resets() {
        let stats = RetryStats::new();
        let breakers = CircuitBreakerTable::new(3, 60);
        stats.record_attempt();
        stats.record_attempt();
        assert_eq!(stats.get_stats(&breakers).total_attempts, 2);
        stats.reset_stats();
        assert_eq!(stats.get_stats(&breakers).total_attempts, 0);
    }

    #[test]
    fn includes_circuit_breaker_statuses() {
        let stats = RetryStats::new();
        let breakers = CircuitBreakerTable::new(1, 60);
        breakers.circuit_record_failure("ep", 0);
        let snapshot = stats.get_stats(&breakers);
        assert!(snapshot.circuit_breakers.contains_key("ep"));
    }
}
