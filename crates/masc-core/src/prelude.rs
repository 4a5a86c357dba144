//! Prelude module - commonly used types for convenient import.
//!
//! ```rust
//! use masc_core::prelude::*;
//! ```

pub use crate::{Clock, IdentifierError, SystemClock, validate_identifier};
