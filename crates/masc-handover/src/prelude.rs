//! Prelude module - commonly used types for convenient import.
//!
//! ```rust
//! use masc_handover::prelude::*;
//! ```

pub use crate::{
    HandoverDetails, HandoverError, HandoverRecord, HandoverResult, HandoverStore, TriggerReason,
    build_successor_prompt, format_as_markdown, trigger_reason_to_string,
};
