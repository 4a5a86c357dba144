//! Prelude module - commonly used types for convenient import.
//!
//! ```rust
//! use masc_ratelimit::prelude::*;
//! ```

pub use crate::{Category, RateError, RateLimitConfig, RateResult, RateTracker};
