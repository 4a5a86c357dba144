//! Transport-level [`McpSession`]s, one per connection, independent of the
//! room-level [`crate::Session`] registry.

use std::collections::HashMap;
use std::sync::Arc;

use rand::RngCore;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::RwLock;

use crate::error::{SessionError, SessionResult};

/// Generates an id of the form `"mcp_" + 32 hex chars`, drawn from a
/// CSPRNG (16 random bytes, hex-encoded).
#[must_use]
pub fn generate_id() -> String {
    let mut bytes = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut bytes);
    format!("mcp_{}", hex::encode(bytes))
}

/// A single MCP transport connection's session record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpSession {
    /// `"mcp_" + 32 hex`, generated by [`generate_id`].
    pub id: String,
    /// The agent this connection has authenticated as, once known.
    pub agent_name: Option<String>,
    /// Unix seconds at creation.
    pub created_at: u64,
    /// Unix seconds at the most recent request on this connection.
    pub last_seen: u64,
    /// Count of requests served on this connection.
    pub request_count: u64,
    /// Free-form transport metadata (client info, negotiated capabilities).
    pub metadata: HashMap<String, Value>,
}

impl McpSession {
    fn new(agent_name: Option<String>, now: u64) -> Self {
        Self {
            id: generate_id(),
            agent_name,
            created_at: now,
            last_seen: now,
            request_count: 0,
            metadata: HashMap::new(),
        }
    }
}

/// The live set of MCP transport-level sessions.
pub struct McpSessionStore {
    sessions: RwLock<HashMap<String, McpSession>>,
}

impl McpSessionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Creates and stores a new session, optionally pre-bound to
    /// `agent_name`.
    pub async fn create(&self, agent_name: Option<String>, now: u64) -> McpSession {
        let session = McpSession::new(agent_name, now);
        self.sessions.write().await.insert(session.id.clone(), session.clone());
        session
    }

    /// Fetches the session with `id`, bumping its `last_seen` and
    /// `request_count`.
    pub async fn touch(&self, id: &str, now: u64) -> SessionResult<McpSession> {
        let mut guard = self.sessions.write().await;
        let session = guard
            .get_mut(id)
            .ok_or_else(|| SessionError::McpSessionNotFound(id.to_string()))?;
        session.last_seen = now;
        session.request_count = session.request_count.saturating_add(1);
        Ok(session.clone())
    }

    /// Fetches the session with `id` without mutating it.
    pub async fn get(&self, id: &str) -> SessionResult<McpSession> {
        self.sessions
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| SessionError::McpSessionNotFound(id.to_string()))
    }

    /// Removes the session with `id`. Idempotent.
    pub async fn remove(&self, id: &str) {
        self.sessions.write().await.remove(id);
    }

    /// Lists every currently stored session.
    pub async fn list_all(&self) -> Vec<McpSession> {
        self.sessions.read().await.values().cloned().collect()
    }

    /// Removes sessions whose `last_seen` is older than `max_age_sec`
    /// relative to `now`, returning the number removed.
    pub async fn cleanup(&self, now: u64, max_age_sec: u64) -> usize {
        let mut guard = self.sessions.write().await;
        let before = guard.len();
        guard.retain(|_, s| now.saturating_sub(s.last_seen) < max_age_sec);
        before - guard.len()
    }
}

impl Default for McpSessionStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Arc-wrapped store, the shape every tool handler holds a clone of.
pub type SharedMcpSessionStore = Arc<McpSessionStore>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_have_expected_shape() {
        let id = generate_id();
        assert!(id.starts_with("mcp_"));
        assert_eq!(id.len(), 4 + 32);
        assert!(id["mcp_".len()..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn generated_ids_are_unique() {
        assert_ne!(generate_id(), generate_id());
    }

    #[tokio::test]
    async fn create_then_get_roundtrips() {
        let store = McpSessionStore::new();
        let session = store.create(Some("claude".to_string()), 10).await;
        let fetched = store.get(&session.id).await.unwrap();
        assert_eq!(fetched.agent_name, Some("claude".to_string()));
        assert_eq!(fetched.request_count, 0);
    }

    #[tokio::test]
    async fn touch_bumps_request_count() {
        let store = McpSessionStore::new();
        let session = store.create(None, 10).await;
        store.touch(&session.id, 11).await.unwrap();
        let fetched = store.touch(&session.id, 12).await.unwrap();
        assert_eq!(fetched.request_count, 2);
        assert_eq!(fetched.last_seen, 12);
    }

    #[tokio::test]
    async fn json_roundtrip_preserves_fields() {
        let store = McpSessionStore::new();
        let session = store.create(Some("gemini".to_string()), 5).await;
        let json = serde_json::to_string(&session).unwrap();
        let back: McpSession = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, session.id);
        assert_eq!(back.agent_name, session.agent_name);
        assert_eq!(back.created_at, session.created_at);
        assert_eq!(back.last_seen, session.last_seen);
        assert_eq!(back.request_count, session.request_count);
    }

    #[tokio::test]
    async fn cleanup_removes_stale_sessions() {
        let store = McpSessionStore::new();
        let old = store.create(None, 0).await;
        let fresh = store.create(None, 100).await;
        let removed = store.cleanup(100, 50).await;
        assert_eq!(removed, 1);
        assert!(store.get(&old.id).await.is_err());
        assert!(store.get(&fresh.id).await.is_ok());
    }

    #[tokio::test]
    async fn remove_is_idempotent() {
        let store = McpSessionStore::new();
        store.remove("mcp_doesnotexist").await;
    }
}
