//! Prelude module - commonly used types for convenient import.
//!
//! ```rust
//! use masc_mcp::prelude::*;
//! ```

pub use crate::{DispatchContext, Dispatcher, GovernanceProfile, JsonRpcRequest, McpError, McpResult, ToolHandler};
