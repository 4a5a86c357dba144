//! Protocol-level error taxonomy for the JSON-RPC dispatcher.

use thiserror::Error;

/// Errors the dispatcher itself can raise, independent of any particular
/// tool handler's domain errors.
#[derive(Debug, Error)]
pub enum McpError {
    /// The inbound bytes were not valid JSON.
    #[error("parse error")]
    ParseError,

    /// The request did not conform to the JSON-RPC 2.0 envelope.
    #[error("invalid request")]
    InvalidRequest,

    /// `method` did not match `initialize`, `tools/list`, `tools/call`, or
    /// any other method this server understands.
    #[error("method not found: {0}")]
    MethodNotFound(String),

    /// `params` was missing a field the method requires, or a field had
    /// the wrong shape.
    #[error("invalid params: {0}")]
    InvalidParams(String),

    /// `tools/call` named a tool no handler in the chain recognizes.
    #[error("unknown tool: {0}")]
    UnknownTool(String),
}

impl McpError {
    /// The JSON-RPC 2.0 error code for this error.
    #[must_use]
    pub fn code(&self) -> i64 {
        match self {
            McpError::ParseError => crate::jsonrpc::PARSE_ERROR,
            McpError::InvalidRequest => crate::jsonrpc::INVALID_REQUEST,
            McpError::MethodNotFound(_) => crate::jsonrpc::METHOD_NOT_FOUND,
            McpError::InvalidParams(_) | McpError::UnknownTool(_) => crate::jsonrpc::INVALID_PARAMS,
        }
    }
}

/// Convenience alias for fallible dispatcher operations.
pub type McpResult<T> = std::result::Result<T, McpError>;
