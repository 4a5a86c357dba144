//! Idempotency keys: dedupe repeated attempts at the same operation within
//! a retention window.

use std::collections::HashMap;
use std::sync::Mutex;

use uuid::Uuid;

/// Tracks idempotency keys that have already been recorded, so a caller can
/// detect a repeated attempt instead of re-applying it.
///
/// Backed by an in-memory table (not `Backend`-persisted); idempotency is a
/// short-lived, process-local guard against immediate retries, not durable
/// state.
pub struct IdempotencyStore {
    seen: Mutex<HashMap<String, u64>>,
}

impl IdempotencyStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            seen: Mutex::new(HashMap::new()),
        }
    }

    /// Returns `true` if `key` was already recorded.
    #[must_use]
    pub fn check_idempotency(&self, key: &str) -> bool {
        self.seen.lock().unwrap_or_else(|e| e.into_inner()).contains_key(key)
    }

    /// Records `key` as seen at `now_secs`. Overwrites any prior record.
    pub fn record_idempotency(&self, key: &str, now_secs: u64) {
        self.seen
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.to_string(), now_secs);
    }

    /// Removes every record older than `now_secs - max_age_secs`, returning
    /// the count removed.
    pub fn cleanup_idempotency(&self, now_secs: u64, max_age_secs: u64) -> usize {
        let cutoff = now_secs.saturating_sub(max_age_secs);
        let mut guard = self.seen.lock().unwrap_or_else(|e| e.into_inner());
        let before = guard.len();
        guard.retain(|_, recorded_at| *recorded_at > cutoff);
        before - guard.len()
    }

    /// Number of keys currently tracked.
    #[must_use]
    pub fn len(&self) -> usize {
        self.seen.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Whether the store currently tracks no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for IdempotencyStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Generates a fresh random idempotency key.
#[must_use]
pub fn generate_idempotency_key() -> String {
    Uuid::new_v4().to_string()
}
