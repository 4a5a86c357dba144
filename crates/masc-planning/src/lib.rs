//! Per-task planning artifacts (plan, notes, error log, deliverable) and
//! the process-level "current task" pointer.
//!
//! [`PlanningStore`] persists each task's [`PlanningContext`] as a
//! canonical `context.json` plus rendered `.md` sibling views, matching
//! §6's filesystem layout. [`CurrentTask`] lets tool calls omit an
//! explicit `task_id` once one has been selected for the session.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

pub mod current_task;
pub mod error;
pub mod prelude;
pub mod store;
pub mod types;

pub use current_task::CurrentTask;
pub use error::{PlanningError, PlanningResult};
pub use store::PlanningStore;
pub use types::{ErrorEntry, PlanningContext, get_context_markdown};
