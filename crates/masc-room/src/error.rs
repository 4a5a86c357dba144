use thiserror::Error;

/// Errors from room state operations.
#[derive(Debug, Error)]
pub enum RoomError {
    /// No agent is registered under the given name.
    #[error("agent not found: {0}")]
    AgentNotFound(String),

    /// An agent name failed [`masc_core::validate_identifier`].
    #[error("invalid agent name {name:?}: {reason}")]
    InvalidAgentName {
        /// The rejected name.
        name: String,
        /// Machine-readable rejection reason.
        reason: String,
    },

    /// No task exists with the given id.
    #[error("task not found: {0}")]
    TaskNotFound(String),

    /// The task is not in a state that allows the requested transition
    /// (claiming a non-`Todo` task, or completing a task the caller does
    /// not hold the claim on).
    #[error("task not claimable: {0}")]
    TaskNotClaimable(String),

    /// No message exists with the given sequence number.
    #[error("message not found: seq {0}")]
    MessageNotFound(u64),

    /// The resource is locked by a different owner.
    #[error("lock held: {0}")]
    LockHeld(String),

    /// The underlying storage backend failed.
    #[error("storage error: {0}")]
    Storage(#[from] masc_storage::StorageError),
}

/// Convenience alias for fallible room operations.
pub type RoomResult<T> = std::result::Result<T, RoomError>;
