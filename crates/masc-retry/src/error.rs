use thiserror::Error;

/// Errors surfaced by the retry/circuit-breaker layer itself (not the
/// wrapped operation's own error type, which flows through
/// [`crate::RetryOutcome::Exhausted`] unchanged).
#[derive(Debug, Error)]
pub enum RetryError {
    /// The named circuit breaker is `Open` and is rejecting calls.
    #[error("circuit open: {0}")]
    CircuitOpen(String),
}

/// Convenience alias for fallible retry-layer operations.
pub type RetryResult<T> = std::result::Result<T, RetryError>;
