//! Room-wide snapshots: [`crate::RoomState`], JSON status, and health.

use serde_json::{Value, json};

use crate::error::RoomResult;
use crate::keys::NEXT_SEQ_KEY;
use crate::room::Room;
use crate::types::{RoomState, TaskStatus};

/// The protocol version this room's status reports.
pub const PROTOCOL_VERSION: &str = "2025-11-25";

impl Room {
    /// Takes a point-in-time snapshot of room state.
    pub async fn read_state(&self) -> RoomResult<RoomState> {
        let active_agents = self.list_agents().await?;
        let pause = self.get_pause().await?;
        let tasks = self.list_tasks().await?;
        let open_task_count = tasks
            .iter()
            .filter(|t| !matches!(t.status, TaskStatus::Completed { .. } | TaskStatus::Cancelled { .. }))
            .count();
        let last_message_seq = match self.backend.get(NEXT_SEQ_KEY).await {
            Ok(bytes) => String::from_utf8_lossy(&bytes).parse().unwrap_or(0),
            Err(_) => 0,
        };
        Ok(RoomState {
            active_agents,
            paused: pause.paused,
            open_task_count,
            last_message_seq,
        })
    }

    /// Reports protocol version plus coarse counters as a JSON value,
    /// suitable for a `room.status` tool response.
    pub async fn status(&self) -> RoomResult<Value> {
        let state = self.read_state().await?;
        Ok(json!({
            "protocol_version": PROTOCOL_VERSION,
            "agent_count": state.active_agents.len(),
            "open_task_count": state.open_task_count,
            "last_message_seq": state.last_message_seq,
            "paused": state.paused,
        }))
    }

    /// Aggregates the backend's own health check into the room's answer.
    pub async fn health_check(&self) -> RoomResult<masc_storage::HealthStatus> {
        Ok(self.backend.health_check().await?)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use crate::room::tests::room;

    #[tokio::test]
    async fn status_reports_protocol_version_and_counts() {
        let room = room();
        room.register_agent("claude", BTreeSet::new()).await.unwrap();
        room.create_task("t", "d", 0, vec![], None).await.unwrap();
        let status = room.status().await.unwrap();
        assert_eq!(status["protocol_version"], "2025-11-25");
        assert_eq!(status["agent_count"], 1);
        assert_eq!(status["open_task_count"], 1);
    }

    #[tokio::test]
    async fn read_state_reflects_pause() {
        let room = room();
        room.pause("claude", None).await.unwrap();
        let state = room.read_state().await.unwrap();
        assert!(state.paused);
    }

    #[tokio::test]
    async fn health_check_delegates_to_backend() {
        let room = room();
        let health = room.health_check().await.unwrap();
        assert!(health.is_healthy);
    }
}
