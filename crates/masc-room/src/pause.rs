//! The room-wide pause flag.

use masc_storage::StorageError;

use crate::error::{RoomError, RoomResult};
use crate::keys::{ROOM_SCOPE, pause_key};
use crate::room::Room;
use crate::types::Pause;

impl Room {
    /// Reads the room's current pause state, defaulting to not-paused if
    /// none has ever been written.
    pub async fn get_pause(&self) -> RoomResult<Pause> {
        match self.backend.get(&pause_key(ROOM_SCOPE)).await {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| RoomError::Storage(StorageError::IOError(e.to_string()))),
            Err(StorageError::NotFound(_)) => Ok(Pause::default()),
            Err(e) => Err(RoomError::Storage(e)),
        }
    }

    async fn save_pause(&self, pause: &Pause) -> RoomResult<()> {
        let bytes = serde_json::to_vec(pause)
            .map_err(|e| RoomError::Storage(StorageError::IOError(e.to_string())))?;
        self.backend.set(&pause_key(ROOM_SCOPE), bytes).await?;
        Ok(())
    }

    /// Pauses the room. A no-op (does not update `actor`/`reason`/`since`)
    /// if already paused, mirroring the source system's "pause from a
    /// non-active state is a no-op" precondition.
    pub async fn pause(&self, actor: &str, reason: Option<String>) -> RoomResult<Pause> {
        let current = self.get_pause().await?;
        if current.paused {
            return Ok(current);
        }
        let pause = Pause {
            paused: true,
            reason,
            actor: Some(actor.to_string()),
            since: Some(self.clock.now_secs()),
        };
        self.save_pause(&pause).await?;
        Ok(pause)
    }

    /// Resumes the room. A no-op if not currently paused.
    pub async fn resume(&self, actor: &str) -> RoomResult<Pause> {
        let current = self.get_pause().await?;
        if !current.paused {
            return Ok(current);
        }
        let pause = Pause {
            paused: false,
            reason: None,
            actor: Some(actor.to_string()),
            since: Some(self.clock.now_secs()),
        };
        self.save_pause(&pause).await?;
        Ok(pause)
    }
}

#[cfg(test)]
mod tests {
    use crate::room::tests::room;

    #[tokio::test]
    async fn pause_then_resume() {
        let room = room();
        let paused = room.pause("claude", Some("maintenance".to_string())).await.unwrap();
        assert!(paused.paused);
        let resumed = room.resume("claude").await.unwrap();
        assert!(!resumed.paused);
    }

    #[tokio::test]
    async fn double_pause_is_a_no_op() {
        let room = room();
        let first = room.pause("claude", Some("a".to_string())).await.unwrap();
        let second = room.pause("gemini", Some("b".to_string())).await.unwrap();
        assert_eq!(first.actor, second.actor);
        assert_eq!(second.reason, Some("a".to_string()));
    }

    #[tokio::test]
    async fn resume_without_pause_is_a_no_op() {
        let room = room();
        let resumed = room.resume("claude").await.unwrap();
        assert!(!resumed.paused);
        assert!(resumed.actor.is_none());
    }
}
