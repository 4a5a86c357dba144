//! The shared room workspace: agents, file locks, broadcast messages, the
//! task state machine, and the room-wide pause flag, all over a
//! [`masc_storage::Backend`].
//!
//! [`Room`] is the single entry point; its operations are split across
//! sibling modules (`room` for agents, `locks`, `messages`, `tasks`,
//! `pause`, `status`) as `impl Room` blocks so each concern's invariants
//! stay next to its own tests.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

mod keys;
mod locks;
mod messages;
mod pause;
pub mod prelude;
mod room;
mod status;
mod tasks;
pub mod types;

pub use error::{RoomError, RoomResult};
pub use room::Room;
pub use status::PROTOCOL_VERSION;
pub use types::{Agent, AgentStatus, Lock, Message, Pause, RoomState, Task, TaskStatus};

pub mod error;
