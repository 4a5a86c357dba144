//! Background task that periodically sweeps expired idempotency records.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use masc_core::Clock;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::idempotency::IdempotencyStore;

/// Owns the background sweep task and lets callers stop it.
pub struct Sweeper {
    handle: Option<JoinHandle<()>>,
    running: Arc<AtomicBool>,
}

/// Whether the sweeper's background task is currently running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweeperStatus {
    /// `true` if the background task is still alive.
    pub running: bool,
}

impl Sweeper {
    /// Spawns a task that, every `interval_secs`, removes idempotency
    /// records older than `max_age_secs`.
    #[must_use]
    pub fn start(
        store: Arc<IdempotencyStore>,
        clock: Arc<dyn Clock>,
        interval_secs: u64,
        max_age_secs: u64,
    ) -> Self {
        let running = Arc::new(AtomicBool::new(true));
        let running_for_task = running.clone();
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(std::time::Duration::from_secs(interval_secs.max(1)));
            loop {
                ticker.tick().await;
                if !running_for_task.load(Ordering::SeqCst) {
                    break;
                }
                let now = clock.now_secs();
                let removed = store.cleanup_idempotency(now, max_age_secs);
                debug!(removed, "swept idempotency store");
            }
        });
        Self {
            handle: Some(handle),
            running,
        }
    }

    /// Signals the background task to stop after its current tick and
    /// aborts it immediately.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    /// Returns whether the sweeper is still running.
    #[must_use]
    pub fn status(&self) -> SweeperStatus {
        SweeperStatus {
            running: self.running.load(Ordering::SeqCst) && self.handle.is_some(),
        }
    }
}

impl Drop for Sweeper {
    fn drop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
