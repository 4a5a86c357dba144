//! [`Room`]: the shared workspace state, wrapping a [`Backend`] with
//! typed agent/lock/message/task/pause operations.

use std::collections::BTreeSet;
use std::sync::Arc;

use masc_core::Clock;
use masc_storage::{Backend, StorageError};

use crate::error::{RoomError, RoomResult};
use crate::keys::agent_key;
use crate::types::{Agent, AgentStatus};

/// Wraps a [`Backend`] with the room's typed vocabulary. Cheap to clone
/// (everything behind an `Arc`); one `Room` is shared across every
/// connection serving a room.
#[derive(Clone)]
pub struct Room {
    pub(crate) backend: Arc<dyn Backend>,
    pub(crate) clock: Arc<dyn Clock>,
    // Message `seq` allocation and task claim races both need "read
    // current state, then act" to be atomic per process; this lock
    // serializes seq allocation the same way `masc-audit`'s append_lock
    // serializes chain-head advancement.
    pub(crate) seq_lock: tokio::sync::Mutex<()>,
}

impl Room {
    /// Creates a room over `backend`, using `clock` for all timestamps.
    #[must_use]
    pub fn new(backend: Arc<dyn Backend>, clock: Arc<dyn Clock>) -> Self {
        Self {
            backend,
            clock,
            seq_lock: tokio::sync::Mutex::new(()),
        }
    }

    /// Registers `name` with the given `capabilities`.
    ///
    /// Idempotent on an already-registered name: the existing record's
    /// `last_seen` is refreshed and its status set to `Active` rather than
    /// erroring.
    pub async fn register_agent(
        &self,
        name: &str,
        capabilities: BTreeSet<String>,
    ) -> RoomResult<Agent> {
        masc_core::validate_identifier(name).map_err(|e| RoomError::InvalidAgentName {
            name: name.to_string(),
            reason: e.as_str().to_string(),
        })?;
        let now = self.clock.now_secs();
        let agent = match self.get_agent(name).await {
            Ok(mut existing) => {
                existing.status = AgentStatus::Active;
                existing.last_seen = now;
                existing.capabilities.extend(capabilities);
                existing
            }
            Err(RoomError::AgentNotFound(_)) => Agent {
                name: name.to_string(),
                status: AgentStatus::Active,
                capabilities,
                registered_at: now,
                last_seen: now,
            },
            Err(e) => return Err(e),
        };
        self.save_agent(&agent).await?;
        Ok(agent)
    }

    pub(crate) async fn save_agent(&self, agent: &Agent) -> RoomResult<()> {
        let bytes = serde_json::to_vec(agent)
            .map_err(|e| RoomError::Storage(StorageError::IOError(e.to_string())))?;
        self.backend.set(&agent_key(&agent.name), bytes).await?;
        Ok(())
    }

    /// Fetches the agent record for `name`.
    pub async fn get_agent(&self, name: &str) -> RoomResult<Agent> {
        match self.backend.get(&agent_key(name)).await {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| RoomError::Storage(StorageError::IOError(e.to_string()))),
            Err(StorageError::NotFound(_)) => Err(RoomError::AgentNotFound(name.to_string())),
            Err(e) => Err(RoomError::Storage(e)),
        }
    }

    /// Removes `name`'s agent record.
    pub async fn remove_agent(&self, name: &str) -> RoomResult<()> {
        self.backend.delete(&agent_key(name)).await?;
        Ok(())
    }

    /// Marks `name` as seen `now`, without changing its capabilities.
    ///
    /// Fails with [`RoomError::AgentNotFound`] if `name` was never
    /// registered.
    pub async fn heartbeat(&self, name: &str) -> RoomResult<Agent> {
        let mut agent = self.get_agent(name).await?;
        agent.status = AgentStatus::Active;
        agent.last_seen = self.clock.now_secs();
        self.save_agent(&agent).await?;
        Ok(agent)
    }

    /// Lists every registered agent's name.
    pub async fn list_agent_names(&self) -> RoomResult<Vec<String>> {
        let keys = self.backend.list(crate::keys::AGENTS_PREFIX).await?;
        Ok(keys
            .into_iter()
            .filter_map(|k| k.strip_prefix(crate::keys::AGENTS_PREFIX).map(str::to_string))
            .collect())
    }

    /// Lists every registered agent.
    pub async fn list_agents(&self) -> RoomResult<Vec<Agent>> {
        let mut agents = Vec::new();
        for name in self.list_agent_names().await? {
            agents.push(self.get_agent(&name).await?);
        }
        Ok(agents)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use masc_core::SystemClock;
    use masc_storage::MemoryBackend;

    pub(crate) fn room() -> Room {
        Room::new(Arc::new(MemoryBackend::new()), Arc::new(SystemClock))
    }

    #[tokio::test]
    async fn register_then_get_roundtrips() {
        let room = room();
        let caps = BTreeSet::from(["code_review".to_string()]);
        let agent = room.register_agent("claude", caps.clone()).await.unwrap();
        assert_eq!(agent.capabilities, caps);
        let fetched = room.get_agent("claude").await.unwrap();
        assert_eq!(fetched.name, "claude");
    }

    #[tokio::test]
    async fn register_is_idempotent() {
        let room = room();
        room.register_agent("claude", BTreeSet::new()).await.unwrap();
        let second = room.register_agent("claude", BTreeSet::new()).await.unwrap();
        assert_eq!(second.name, "claude");
    }

    #[tokio::test]
    async fn rejects_invalid_names() {
        let room = room();
        assert!(matches!(
            room.register_agent("", BTreeSet::new()).await,
            Err(RoomError::InvalidAgentName { .. })
        ));
        assert!(matches!(
            room.register_agent("a/b", BTreeSet::new()).await,
            Err(RoomError::InvalidAgentName { .. })
        ));
    }

    #[tokio::test]
    async fn remove_then_get_not_found() {
        let room = room();
        room.register_agent("claude", BTreeSet::new()).await.unwrap();
        room.remove_agent("claude").await.unwrap();
        assert!(matches!(
            room.get_agent("claude").await,
            Err(RoomError::AgentNotFound(_))
        ));
    }

    #[tokio::test]
    async fn list_agent_names_enumerates_registered() {
        let room = room();
        room.register_agent("a", BTreeSet::new()).await.unwrap();
        room.register_agent("b", BTreeSet::new()).await.unwrap();
        let mut names = room.list_agent_names().await.unwrap();
        names.sort();
        assert_eq!(names, vec!["a".to_string(), "b".to_string()]);
    }
}
