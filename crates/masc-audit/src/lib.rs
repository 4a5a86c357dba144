//! Hash-chained, append-only audit log for masc-mcp.
//!
//! Every tool invocation, auth decision, and state mutation appends an
//! [`AuditEntry`] whose hash folds in the previous entry's hash, so a
//! room's history can be verified offline with [`AuditLog::verify_chain`].

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

pub mod entry;
pub mod error;
pub mod log;
pub mod prelude;

pub use entry::{AuditEntry, GENESIS_HASH};
pub use error::{AuditError, AuditResult};
pub use log::AuditLog;
