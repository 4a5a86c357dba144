//! Per-endpoint circuit breakers: `Closed -> Open -> HalfOpen -> Closed`.

use std::collections::HashMap;
use std::sync::Mutex;

use serde::Serialize;

/// Circuit breaker lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CircuitState {
    /// Calls pass through normally.
    Closed,
    /// Calls are rejected without attempting the operation.
    Open,
    /// A single trial call is allowed through to test recovery.
    HalfOpen,
}

#[derive(Debug, Clone)]
struct CircuitBreakerState {
    state: CircuitState,
    consecutive_failures: u32,
    opened_at_secs: Option<u64>,
}

impl CircuitBreakerState {
    fn new() -> Self {
        Self {
            state: CircuitState::Closed,
            consecutive_failures: 0,
            opened_at_secs: None,
        }
    }
}

/// Snapshot of a single circuit breaker's status, suitable for reporting.
#[derive(Debug, Clone, Serialize)]
pub struct CircuitStatus {
    /// Name of the guarded endpoint/operation.
    pub name: String,
    /// Current lifecycle state.
    pub state: CircuitState,
    /// Consecutive failures observed since the last success.
    pub consecutive_failures: u32,
}

/// Table of named circuit breakers.
///
/// Opens after `failure_threshold` consecutive failures; after
/// `reset_timeout_secs` in `Open`, the next `circuit_allows` call transitions
/// to `HalfOpen` and permits exactly one trial call.
pub struct CircuitBreakerTable {
    breakers: Mutex<HashMap<String, CircuitBreakerState>>,
    failure_threshold: u32,
    reset_timeout_secs: u64,
}

impl CircuitBreakerTable {
    /// Creates a table with the given failure threshold and open-state
    /// timeout before a half-open trial is permitted.
    #[must_use]
    pub fn new(failure_threshold: u32, reset_timeout_secs: u64) -> Self {
        Self {
            breakers: Mutex::new(HashMap::new()),
            failure_threshold,
            reset_timeout_secs,
        }
    }

    /// Returns whether a call to `name` should be allowed right now, given
    /// the current time. May transition `Open -> HalfOpen` as a side
    /// effect once the reset timeout has elapsed.
    pub fn circuit_allows(&self, name: &str, now_secs: u64) -> bool {
        let mut guard = self.breakers.lock().unwrap_or_else(|e| e.into_inner());
        let entry = guard.entry(name.to_string()).or_insert_with(CircuitBreakerState::new);
        match entry.state {
            CircuitState::Closed | CircuitState::HalfOpen => true,
            CircuitState::Open => {
                let opened_at = entry.opened_at_secs.unwrap_or(now_secs);
                if now_secs.saturating_sub(opened_at) >= self.reset_timeout_secs {
                    entry.state = CircuitState::HalfOpen;
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Records a success for `name`, closing the circuit and resetting its
    /// failure count.
    pub fn circuit_record_success(&self, name: &str) {
        let mut guard = self.breakers.lock().unwrap_or_else(|e| e.into_inner());
        let entry = guard.entry(name.to_string()).or_insert_with(CircuitBreakerState::new);
        entry.state = CircuitState::Closed;
        entry.consecutive_failures = 0;
        entry.opened_at_secs = None;
    }

    /// Records a failure for `name`. Opens the circuit if the consecutive
    /// failure count reaches the configured threshold, or if the failure
    /// occurred during a `HalfOpen` trial.
    pub fn circuit_record_failure(&self, name: &str, now_secs: u64) {
        let mut guard = self.breakers.lock().unwrap_or_else(|e| e.into_inner());
        let entry = guard.entry(name.to_string()).or_insert_with(CircuitBreakerState::new);
        entry.consecutive_failures = entry.consecutive_failures.saturating_add(1);
        if entry.state == CircuitState::HalfOpen || entry.consecutive_failures >= self.failure_threshold {
            entry.state = CircuitState::Open;
            entry.opened_at_secs = Some(now_secs);
        }
    }

    /// Forces `name` back to `Closed` regardless of its failure history.
    pub fn reset_circuit_breaker(&self, name: &str) {
        let mut guard = self.breakers.lock().unwrap_or_else(|e| e.into_inner());
        guard.insert(name.to_string(), CircuitBreakerState::new());
    }

    /// Returns a snapshot of `name`'s current status, or `Closed`/0 if it
    /// has never recorded an attempt.
    #[must_use]
    pub fn circuit_status(&self, name: &str) -> CircuitStatus {
        let guard = self.breakers.lock().unwrap_or_else(|e| e.into_inner());
        let entry = guard.get(name).cloned().unwrap_or_else(CircuitBreakerState::new);
        CircuitStatus {
            name: name.to_string(),
            state: entry.state,
            consecutive_failures: entry.consecutive_failures,
        }
    }

    /// Returns a status snapshot for every breaker that has recorded at
    /// least one attempt.
    #[must_use]
    pub fn all_statuses(&self) -> Vec<CircuitStatus> {
        let guard = self.breakers.lock().unwrap_or_else(|e| e.into_inner());
        guard
            .iter()
            .map(|(name, entry)| CircuitStatus {
                name: name.clone(),
                state: entry.state,
                consecutive_failures: entry.consecutive_failures,
            })
            .collect()
    }
}
