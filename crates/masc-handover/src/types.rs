//! The handover record and its trigger reason.

use serde::{Deserialize, Serialize};

/// Why a handover was created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TriggerReason {
    /// Context window usage crossed a threshold, given as a percent.
    ContextLimit(u32),
    /// A wall-clock timeout elapsed, given in seconds.
    Timeout(u64),
    /// The agent explicitly requested hand-off.
    Explicit,
    /// An unrecoverable error forced hand-off.
    FatalError(String),
    /// The task finished and hand-off is purely informational.
    TaskComplete,
}

/// Maps a [`TriggerReason`] to its stable, machine-readable string form.
#[must_use]
pub fn trigger_reason_to_string(reason: &TriggerReason) -> String {
    match reason {
        TriggerReason::ContextLimit(percent) => format!("context_limit_{percent}"),
        TriggerReason::Timeout(seconds) => format!("timeout_{seconds}s"),
        TriggerReason::Explicit => "explicit".to_string(),
        TriggerReason::FatalError(msg) => format!("error: {msg}"),
        TriggerReason::TaskComplete => "task_complete".to_string(),
    }
}

/// A record of one agent handing off a task to another.
///
/// `to_agent` is `None` at creation: "pending, claimable by any agent".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandoverRecord {
    /// Opaque, unique, `"handover-"`-prefixed.
    pub id: String,
    /// The agent handing off.
    pub from_agent: String,
    /// The agent that claimed the handover, if any.
    pub to_agent: Option<String>,
    /// The task being handed off.
    pub task_id: String,
    /// The MCP session the outgoing agent was using.
    pub session_id: String,
    /// What the outgoing agent was trying to accomplish.
    pub current_goal: String,
    /// A prose summary of progress so far.
    pub progress_summary: String,
    /// Steps already completed.
    pub completed_steps: Vec<String>,
    /// Steps still outstanding.
    pub pending_steps: Vec<String>,
    /// Decisions made that a successor should not re-litigate.
    pub key_decisions: Vec<String>,
    /// Assumptions the outgoing agent made.
    pub assumptions: Vec<String>,
    /// Things a successor should watch out for.
    pub warnings: Vec<String>,
    /// Errors encountered that were never resolved.
    pub unresolved_errors: Vec<String>,
    /// Files touched during the outgoing agent's work.
    pub modified_files: Vec<String>,
    /// Unix seconds at creation.
    pub created_at: u64,
    /// Context window usage at hand-off time, as a percent.
    pub context_usage_percent: u32,
    /// Stable string form of the trigger reason (see
    /// [`trigger_reason_to_string`]).
    pub handover_reason: String,
}
