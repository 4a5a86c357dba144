use thiserror::Error;

/// Errors from planning store operations.
#[derive(Debug, Error)]
pub enum PlanningError {
    /// No planning context has been `init`-ed for the given task.
    #[error("no planning context for task {0}")]
    NotFound(String),

    /// `resolve_error` was given an index past the end of the error list.
    #[error("error index {index} out of range (task {task_id} has {len})")]
    ErrorIndexOutOfRange {
        /// The task whose errors were indexed.
        task_id: String,
        /// The requested index.
        index: usize,
        /// The number of errors actually on file.
        len: usize,
    },

    /// `resolve_task_id` was called with no explicit id and no current
    /// task set.
    #[error("no task id given and no current task set")]
    NoCurrentTask,

    /// The underlying storage backend failed.
    #[error("storage error: {0}")]
    Storage(#[from] masc_storage::StorageError),
}

/// Convenience alias for fallible planning operations.
pub type PlanningResult<T> = std::result::Result<T, PlanningError>;
