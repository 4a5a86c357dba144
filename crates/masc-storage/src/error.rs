use thiserror::Error;

/// Errors produced by a [`crate::Backend`] implementation.
#[derive(Debug, Error)]
pub enum StorageError {
    /// No value is stored under the given key.
    #[error("key not found: {0}")]
    NotFound(String),

    /// `set_if_not_exists` was called on a key that already has a value.
    #[error("key already exists: {0}")]
    AlreadyExists(String),

    /// The key does not satisfy the validation rules (empty, raw path
    /// separator, leading colon, or a `..` segment after colon expansion).
    #[error("invalid key {key:?}: {reason}")]
    InvalidKey {
        /// The rejected key.
        key: String,
        /// Human-readable rejection reason.
        reason: String,
    },

    /// The underlying filesystem (or other medium) operation failed.
    #[error("storage I/O error: {0}")]
    IOError(String),
}

/// Convenience alias for fallible storage operations.
pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Validates a key against the shared identifier rules, wrapping any
/// rejection in [`StorageError::InvalidKey`].
pub(crate) fn validate_key(key: &str) -> StorageResult<()> {
    masc_core::validate_identifier(key).map_err(|e| StorageError::InvalidKey {
        key: key.to_string(),
        reason: e.as_str().to_string(),
    })
}
