//! Context-exhaustion hand-off records between agents.
//!
//! [`HandoverStore`] persists [`HandoverRecord`]s over a
//! [`masc_storage::Backend`]; claim exclusivity follows the same
//! `set_if_not_exists`-marker pattern `masc-room` uses for task claims.
//! [`format_as_markdown`] and [`build_successor_prompt`] render a record
//! for human and successor-agent consumption respectively.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

pub mod error;
pub mod format;
pub mod prelude;
pub mod store;
pub mod types;

pub use error::{HandoverError, HandoverResult};
pub use format::{build_successor_prompt, format_as_markdown};
pub use store::{HandoverDetails, HandoverStore};
pub use types::{HandoverRecord, TriggerReason, trigger_reason_to_string};
