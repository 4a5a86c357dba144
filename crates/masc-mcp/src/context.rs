//! The bundle of shared state every tool handler dispatches against.

use std::sync::Arc;

use masc_auth::AuthStore;
use masc_core::Clock;
use masc_handover::HandoverStore;
use masc_planning::{CurrentTask, PlanningStore};
use masc_ratelimit::RateLimitConfig;
use masc_retry::CircuitBreakerTable;
use masc_room::Room;
use masc_session::{McpSessionStore, SessionRegistry};

use masc_audit::AuditLog;

/// Everything a [`crate::tool_handler::ToolHandler`] needs to serve one
/// room. Cheap to clone: every field is an `Arc` or a small `Copy` value,
/// so one context is shared across every connection serving the room.
#[derive(Clone)]
pub struct DispatchContext {
    /// The room's agents, locks, messages, tasks, and pause flag.
    pub room: Arc<Room>,
    /// Role/capability and token lifecycle.
    pub auth: Arc<AuthStore>,
    /// Connected-agent presence and per-agent rate trackers.
    pub sessions: Arc<SessionRegistry>,
    /// Transport-level MCP session records.
    pub mcp_sessions: Arc<McpSessionStore>,
    /// Room-wide rate limit tuning, read fresh from configuration at
    /// startup (not mutated at runtime).
    pub rate_config: RateLimitConfig,
    /// Context-exhaustion hand-off records.
    pub handovers: Arc<HandoverStore>,
    /// Per-task planning artifacts and the "current task" pointer.
    pub planning: Arc<PlanningStore>,
    /// The process-level "current task" selection.
    pub current_task: Arc<CurrentTask>,
    /// The room's hash-chained audit log.
    pub audit: Arc<AuditLog>,
    /// Per-endpoint circuit breakers guarding external I/O.
    pub circuits: Arc<CircuitBreakerTable>,
    /// Shared clock, for handlers that need "now" outside of a
    /// component call that already takes it implicitly.
    pub clock: Arc<dyn Clock>,
}

/// Test-only fixture construction, shared by every handler's unit tests.
#[cfg(test)]
pub(crate) mod test_support {
    use super::DispatchContext;
    use std::sync::Arc;

    use masc_auth::AuthStore;
    use masc_core::SystemClock;
    use masc_handover::HandoverStore;
    use masc_planning::{CurrentTask, PlanningStore};
    use masc_ratelimit::RateLimitConfig;
    use masc_retry::CircuitBreakerTable;
    use masc_room::Room;
    use masc_session::{McpSessionStore, SessionRegistry};
    use masc_storage::MemoryBackend;

    use masc_audit::AuditLog;

    pub(crate) fn test_context() -> DispatchContext {
        let backend = Arc::new(MemoryBackend::new());
        let clock = Arc::new(SystemClock);
        DispatchContext {
            room: Arc::new(Room::new(backend.clone(), clock.clone())),
            auth: Arc::new(AuthStore::new(backend.clone(), clock.clone())),
            sessions: Arc::new(SessionRegistry::new()),
            mcp_sessions: Arc::new(McpSessionStore::new()),
            rate_config: RateLimitConfig::default(),
            handovers: Arc::new(HandoverStore::new(backend.clone(), clock.clone())),
            planning: Arc::new(PlanningStore::new(backend.clone(), clock.clone())),
            current_task: Arc::new(CurrentTask::new()),
            audit: Arc::new(AuditLog::new(backend, clock.clone())),
            circuits: Arc::new(CircuitBreakerTable::new(5, 30)),
            clock,
        }
    }
}
