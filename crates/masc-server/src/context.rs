//! Builds a [`DispatchContext`] from loaded [`masc_config::Config`].

use std::sync::Arc;

use masc_audit::AuditLog;
use masc_auth::AuthStore;
use masc_core::{Clock, SystemClock};
use masc_handover::HandoverStore;
use masc_mcp::DispatchContext;
use masc_planning::{CurrentTask, PlanningStore};
use masc_retry::CircuitBreakerTable;
use masc_room::Room;
use masc_session::{McpSessionStore, SessionRegistry};
use masc_storage::{Backend, FilesystemBackend, MemoryBackend};

/// Breaker parameters for the circuits guarding a room's own storage
/// calls. Not yet exposed as a `masc.retry.*` config key — the section
/// only carries the retry-backoff shape today.
const CIRCUIT_FAILURE_THRESHOLD: u32 = 5;
const CIRCUIT_RESET_TIMEOUT_SECS: u64 = 30;

/// Constructs every component a room needs from `config`, choosing a
/// [`FilesystemBackend`] rooted at `config.masc.base_path` when set, or an
/// in-memory backend otherwise (an ephemeral room, useful for smoke-testing
/// a config file before committing to a location on disk).
#[must_use]
pub fn build_dispatch_context(config: &masc_config::Config) -> DispatchContext {
    let backend: Arc<dyn Backend> = match &config.masc.base_path {
        Some(path) => Arc::new(FilesystemBackend::new(path.clone())),
        None => Arc::new(MemoryBackend::new()),
    };
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    DispatchContext {
        room: Arc::new(Room::new(backend.clone(), clock.clone())),
        auth: Arc::new(AuthStore::new(backend.clone(), clock.clone())),
        sessions: Arc::new(SessionRegistry::new()),
        mcp_sessions: Arc::new(McpSessionStore::new()),
        rate_config: config.masc.rate,
        handovers: Arc::new(HandoverStore::new(backend.clone(), clock.clone())),
        planning: Arc::new(PlanningStore::new(backend.clone(), clock.clone())),
        current_task: Arc::new(CurrentTask::new()),
        audit: Arc::new(AuditLog::new(backend, clock.clone())),
        circuits: Arc::new(CircuitBreakerTable::new(CIRCUIT_FAILURE_THRESHOLD, CIRCUIT_RESET_TIMEOUT_SECS)),
        clock,
    }
}

/// Applies `config.masc.auth` to a freshly built context's [`AuthStore`].
///
/// Called once at startup, after [`build_dispatch_context`], since auth
/// enablement is itself persisted room state rather than an in-memory
/// field on the context.
///
/// # Errors
///
/// Propagates any storage failure from [`AuthStore::enable_auth`]/
/// [`AuthStore::disable_auth`].
pub async fn apply_auth_config(ctx: &DispatchContext, config: &masc_config::Config) -> Result<(), masc_auth::AuthError> {
    if config.masc.auth.enabled {
        ctx.auth.enable_auth(config.masc.auth.require_token).await
    } else {
        ctx.auth.disable_auth().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use masc_config::Config;

    #[test]
    fn memory_backend_when_base_path_unset() {
        let config = Config::default();
        let ctx = build_dispatch_context(&config);
        assert_eq!(ctx.rate_config.general_limit, config.masc.rate.general_limit);
    }

    #[test]
    fn filesystem_backend_when_base_path_set() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.masc.base_path = Some(dir.path().to_path_buf());
        // Constructing the context must not touch the filesystem eagerly;
        // only actual room operations create files under `dir`.
        let _ctx = build_dispatch_context(&config);
    }

    #[tokio::test]
    async fn apply_auth_config_enables_when_configured() {
        let mut config = Config::default();
        config.masc.auth.enabled = true;
        config.masc.auth.require_token = true;
        let ctx = build_dispatch_context(&config);
        apply_auth_config(&ctx, &config).await.unwrap();
        let loaded = ctx.auth.load_config().await.unwrap();
        assert!(loaded.enabled);
        assert!(loaded.require_token);
    }
}
