//! Prelude module - commonly used types for convenient import.
//!
//! ```rust
//! use masc_session::prelude::*;
//! ```

pub use crate::{
    EnqueueOutcome, McpSession, McpSessionStore, SessionError, SessionRegistry, SessionResult,
    extract_mcp_session_id, generate_id, handle_mcp_session_tool,
};
