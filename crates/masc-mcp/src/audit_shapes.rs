//! Fixed, minimal JSON views exposed to clients for audit entries and MCP
//! sessions, independent of the richer internal record each is derived
//! from (chain hashes, request counters, …).

use serde_json::{Value, json};

use masc_audit::AuditEntry;
use masc_session::McpSession;

/// Renders `entry` as the client-facing `audit_event` shape:
/// `{timestamp, agent, event_type, success, detail?}`.
#[must_use]
pub fn audit_event(entry: &AuditEntry) -> Value {
    let mut event = json!({
        "timestamp": entry.timestamp,
        "agent": entry.agent,
        "event_type": entry.event_type,
        "success": entry.success,
    });
    if let Some(detail) = &entry.detail {
        event["detail"] = json!(detail);
    }
    event
}

/// Renders `session` as the client-facing `mcp_session_record` shape:
/// `{id, agent_name?, created_at, last_seen}`.
#[must_use]
pub fn mcp_session_record(session: &McpSession) -> Value {
    json!({
        "id": session.id,
        "agent_name": session.agent_name,
        "created_at": session.created_at,
        "last_seen": session.last_seen,
    })
}
