//! Prelude module - commonly used types for convenient import.
//!
//! ```rust
//! use masc_audit::prelude::*;
//! ```

pub use crate::{AuditEntry, AuditError, AuditLog, AuditResult, GENESIS_HASH};
