//! Prelude module - commonly used types for convenient import.
//!
//! ```rust
//! use masc_mention::prelude::*;
//! ```

pub use crate::{
    MentionMode, agent_type_of_mention, extract, extract_nickname, is_spawnable, parse,
    resolve_targets,
};
