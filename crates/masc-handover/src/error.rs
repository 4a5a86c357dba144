use thiserror::Error;

/// Errors from handover record operations.
#[derive(Debug, Error)]
pub enum HandoverError {
    /// No handover record exists with the given id.
    #[error("handover not found: {0}")]
    NotFound(String),

    /// `claim_handover` was called on a record that already has a
    /// `to_agent`.
    #[error("handover already claimed: {0}")]
    AlreadyClaimed(String),

    /// The underlying storage backend failed.
    #[error("storage error: {0}")]
    Storage(#[from] masc_storage::StorageError),
}

/// Convenience alias for fallible handover operations.
pub type HandoverResult<T> = std::result::Result<T, HandoverError>;
