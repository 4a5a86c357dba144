use thiserror::Error;

/// Errors from the audit log.
#[derive(Debug, Error)]
pub enum AuditError {
    /// No entry is recorded at the requested sequence number.
    #[error("audit entry not found: {0}")]
    NotFound(u64),

    /// The underlying storage backend failed.
    #[error("storage error: {0}")]
    Storage(#[from] masc_storage::StorageError),

    /// An entry on disk did not deserialize, or its chain hash did not
    /// match its recomputed value.
    #[error("corrupt audit entry: {0}")]
    Corrupt(String),
}

/// Convenience alias for fallible audit operations.
pub type AuditResult<T> = std::result::Result<T, AuditError>;
