//! Sliding-window + burst rate limiting, one [`RateTracker`] per session.
//!
//! Three independent categories (`General`, `Broadcast`, `TaskOps`) each
//! get their own sliding window; a shared burst bucket grants extra
//! headroom once a window is exhausted, refilling every
//! `burst_window_sec`. See §4.6 of the coordination spec for the exact
//! four-step `check_and_record` contract this implements.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

pub mod error;
pub mod prelude;
pub mod tracker;
pub mod types;

pub use error::{RateError, RateResult};
pub use tracker::RateTracker;
pub use types::{Category, RateLimitConfig};
