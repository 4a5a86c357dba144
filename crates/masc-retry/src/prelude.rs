//! Prelude module - commonly used types for convenient import.
//!
//! ```rust
//! use masc_retry::prelude::*;
//! ```

pub use crate::{
    CircuitBreakerTable, CircuitState, CircuitStatus, IdempotencyStore, RetryError, RetryOutcome,
    RetryPolicy, RetryResult, RetryStats, StatsSnapshot, Sweeper, SweeperStatus, calculate_delay,
    generate_idempotency_key, with_retry,
};
