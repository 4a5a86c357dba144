//! The room's persisted entity types: agents, locks, messages, tasks, and
//! the room-wide pause flag.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// An agent's presence state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentStatus {
    /// The agent has an open session and is expected to be responsive.
    Active,
    /// The agent has been registered but has no open session.
    Inactive,
}

/// A named participant in the room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    /// Unique within the room.
    pub name: String,
    /// Current presence state.
    pub status: AgentStatus,
    /// Declared capabilities (free-form tags, not [`masc_auth::Capability`]).
    pub capabilities: BTreeSet<String>,
    /// Unix seconds at first `register_agent` call.
    pub registered_at: u64,
    /// Unix seconds at the most recent `register_agent`/heartbeat call.
    pub last_seen: u64,
}

/// An exclusive lock on a named resource (typically a file path).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lock {
    /// The locked resource.
    pub resource: String,
    /// The agent that holds the lock.
    pub owner: String,
    /// Unix seconds at acquisition.
    pub acquired_at: u64,
    /// Optional expiry, past which the lock is considered stale.
    pub expires_at: Option<u64>,
}

/// A broadcast message persisted in the room's dense sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Monotone, dense, strictly increasing within the room; starts at 1.
    pub seq: u64,
    /// The sending agent.
    pub from_agent: String,
    /// Raw message body.
    pub content: String,
    /// Unix seconds at `broadcast`.
    pub timestamp: u64,
    /// The first `@`-mention token extracted from `content`, if any.
    pub mention: Option<String>,
}

/// A task's lifecycle state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum TaskStatus {
    /// Unclaimed, awaiting `claim_task`.
    Todo,
    /// Claimed by `agent`; only that agent may complete it.
    InProgress {
        /// The claiming agent.
        agent: String,
    },
    /// Finished by `agent`. Terminal.
    Completed {
        /// The completing agent.
        agent: String,
    },
    /// Abandoned, with a human-readable reason. Terminal.
    Cancelled {
        /// Why the task was cancelled.
        reason: String,
    },
}

/// A unit of work tracked by the room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Opaque, unique within the room.
    pub id: String,
    /// Short human-readable title.
    pub title: String,
    /// Longer description of the work.
    pub description: String,
    /// Carried attribute; no ordering semantics are enforced here (spec
    /// §3 leaves "lower = higher priority" unspecified and treats it as an
    /// opaque carried value).
    pub priority: i64,
    /// Current lifecycle state.
    pub status: TaskStatus,
    /// Files this task concerns, as room-relative paths.
    pub files: Vec<String>,
    /// Unix seconds at `create_task`.
    pub created_at: u64,
    /// Optional worktree identifier the task runs in.
    pub worktree: Option<String>,
}

/// The room-wide "soft stop" flag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pause {
    /// Whether the room is currently paused.
    pub paused: bool,
    /// Why it was paused.
    pub reason: Option<String>,
    /// Who paused (or resumed) it.
    pub actor: Option<String>,
    /// Unix seconds of the most recent pause/resume transition.
    pub since: Option<u64>,
}

/// A point-in-time snapshot of room state, as returned by
/// [`crate::Room::read_state`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomState {
    /// Every currently registered agent.
    pub active_agents: Vec<Agent>,
    /// Whether the room is currently paused.
    pub paused: bool,
    /// Number of tasks not yet in a terminal state.
    pub open_task_count: usize,
    /// Highest allocated message sequence number (0 if none yet).
    pub last_message_seq: u64,
}
