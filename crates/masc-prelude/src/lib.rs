//! Unified prelude for the masc-mcp workspace.
//!
//! This crate provides a single import to bring in the commonly used
//! types from every component crate. Use it when wiring a binary (like
//! `masc-server`) that touches most of the workspace; reach for a single
//! crate's own `prelude` module when you only need one component.
//!
//! # Usage
//!
//! ```rust,ignore
//! use masc_prelude::*;
//!
//! // Now you have access to types from:
//! // - masc-core      (Clock, identifier validation)
//! // - masc-storage    (Backend, MemoryBackend, FilesystemBackend)
//! // - masc-crypto     (Envelope, token hashing)
//! // - masc-auth       (AuthStore, Role, Capability)
//! // - masc-audit      (AuditLog, AuditEntry)
//! // - masc-retry      (RetryPolicy, CircuitBreakerTable)
//! // - masc-ratelimit  (RateTracker, RateLimitConfig)
//! // - masc-session    (SessionRegistry, McpSessionStore)
//! // - masc-mention    (parse, resolve_targets)
//! // - masc-room       (Room, Agent, Task, Message)
//! // - masc-handover   (HandoverStore, HandoverRecord)
//! // - masc-planning   (PlanningStore, PlanningContext)
//! // - masc-mcp        (Dispatcher, DispatchContext)
//! // - masc-telemetry  (LogConfig, setup_logging)
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

pub use masc_core::prelude::*;
pub use masc_storage::prelude::*;
pub use masc_crypto::prelude::*;
pub use masc_auth::prelude::*;
pub use masc_audit::prelude::*;
pub use masc_retry::prelude::*;
pub use masc_ratelimit::prelude::*;
pub use masc_session::prelude::*;
pub use masc_mention::prelude::*;
pub use masc_room::prelude::*;
pub use masc_handover::prelude::*;
pub use masc_planning::prelude::*;
pub use masc_mcp::prelude::*;
pub use masc_telemetry::prelude::*;
