//! The tool-namespace handlers, and the fixed order they're tried in.

pub mod agent;
pub mod audit;
pub mod auth;
pub mod cache;
pub mod control;
pub mod cost;
pub mod handover;
pub mod lock;
pub mod planning;
pub mod rate_limit;
pub mod room;
pub mod session;
pub mod swarm;
pub mod task;
pub mod walph;
pub mod worktree;

use std::path::PathBuf;

use crate::tool_handler::ToolHandler;

/// Builds the ordered handler chain, matching the contractual tool
/// namespace order: agent, lock, audit, rate_limit, cost, walph, task,
/// room, control, auth, cache, worktree, swarm, session, planning,
/// handover.
///
/// Worktrees are rooted under the system temp directory; use
/// [`default_chain_with_base_path`] to root them under a room's
/// configured base path instead.
#[must_use]
pub fn default_chain() -> Vec<Box<dyn ToolHandler>> {
    default_chain_with_base_path(std::env::temp_dir().join("masc-worktrees"))
}

/// Builds the ordered handler chain with worktrees rooted at
/// `worktree_base_path`.
#[must_use]
pub fn default_chain_with_base_path(worktree_base_path: PathBuf) -> Vec<Box<dyn ToolHandler>> {
    vec![
        Box::new(agent::AgentHandler),
        Box::new(lock::LockHandler),
        Box::new(audit::AuditHandler),
        Box::new(rate_limit::RateLimitHandler),
        Box::new(cost::CostHandler::new()),
        Box::new(walph::WalphHandler::new()),
        Box::new(task::TaskHandler),
        Box::new(room::RoomHandler),
        Box::new(control::ControlHandler),
        Box::new(auth::AuthHandler),
        Box::new(cache::CacheHandler::new()),
        Box::new(worktree::WorktreeHandler::new(worktree_base_path)),
        Box::new(swarm::SwarmHandler),
        Box::new(session::SessionHandler),
        Box::new(planning::PlanningHandler),
        Box::new(handover::HandoverHandler),
    ]
}
