use thiserror::Error;

use crate::types::Category;

/// Errors from a rate-limit check.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RateError {
    /// The caller has exceeded its allowance for `category` and must wait
    /// `retry_after_sec` before trying again.
    #[error("rate limited on {category:?}, retry after {retry_after_sec}s")]
    RateLimited {
        /// The window the caller exceeded.
        category: Category,
        /// Seconds until the oldest timestamp in the window expires.
        retry_after_sec: u64,
    },
}

/// Convenience alias for fallible rate-limit operations.
pub type RateResult<T> = std::result::Result<T, RateError>;
