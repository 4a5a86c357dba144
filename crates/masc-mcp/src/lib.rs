//! JSON-RPC 2.0 framing, the `initialize` handshake, and tool dispatch
//! for a masc room.
//!
//! [`Dispatcher`] is the single entry point: it routes `initialize`,
//! `tools/list`, and `tools/call` against a [`DispatchContext`] bundling
//! every component a room needs, trying each tool-namespace
//! [`ToolHandler`] in the fixed chain order built by
//! [`handlers::default_chain`].

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

pub mod args;
pub mod audit_shapes;
pub mod context;
pub mod dispatcher;
pub mod error;
pub mod framing;
pub mod governance;
pub mod handlers;
pub mod initialize;
pub mod jsonrpc;
pub mod prelude;
pub mod tool_handler;

pub use context::DispatchContext;
pub use dispatcher::Dispatcher;
pub use error::{McpError, McpResult};
pub use framing::TransportMode;
pub use governance::{GovernanceProfile, governance_defaults};
pub use jsonrpc::JsonRpcRequest;
pub use tool_handler::ToolHandler;
