//! Two independent session stores: [`SessionRegistry`] tracks connected
//! agents (presence, message queue, rate tracker) and [`McpSessionStore`]
//! tracks MCP transport-level connections.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

pub mod error;
pub mod headers;
pub mod mcp_session;
pub mod prelude;
pub mod session;
pub mod tool;

pub use error::{SessionError, SessionResult};
pub use headers::extract_mcp_session_id;
pub use mcp_session::{McpSession, McpSessionStore, SharedMcpSessionStore, generate_id};
pub use session::{EnqueueOutcome, Session, SessionRegistry, MAX_QUEUED_MESSAGES};
pub use tool::handle_mcp_session_tool;
