use thiserror::Error;

/// Errors from session registry and MCP session store operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// No session is registered for the given agent.
    #[error("no session for agent {0}")]
    AgentNotFound(String),

    /// No MCP transport session exists with the given id.
    #[error("no mcp session with id {0}")]
    McpSessionNotFound(String),

    /// A required `session_id` argument was missing.
    #[error("missing required field: session_id")]
    MissingSessionId,

    /// The requested session tool action is not one of
    /// `create`/`list`/`get`/`remove`/`cleanup`.
    #[error("unknown session action: {0}")]
    UnknownAction(String),
}

/// Convenience alias for fallible session operations.
pub type SessionResult<T> = std::result::Result<T, SessionError>;
