//! Prelude module - commonly used types for convenient import.
//!
//! ```rust
//! use masc_room::prelude::*;
//! ```

pub use crate::{
    Agent, AgentStatus, Lock, Message, Pause, Room, RoomError, RoomResult, RoomState, Task,
    TaskStatus,
};
