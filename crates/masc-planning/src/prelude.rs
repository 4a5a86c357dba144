//! Prelude module - commonly used types for convenient import.
//!
//! ```rust
//! use masc_planning::prelude::*;
//! ```

pub use crate::{
    CurrentTask, ErrorEntry, PlanningContext, PlanningError, PlanningResult, PlanningStore,
    get_context_markdown,
};
