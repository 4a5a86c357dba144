//! Broadcast messages: monotone dense `seq` allocation and mention
//! extraction.

use masc_storage::StorageError;

use crate::error::{RoomError, RoomResult};
use crate::keys::{MESSAGES_PREFIX, NEXT_SEQ_KEY, message_key};
use crate::room::Room;
use crate::types::Message;

impl Room {
    async fn next_seq(&self) -> RoomResult<u64> {
        match self.backend.get(NEXT_SEQ_KEY).await {
            Ok(bytes) => String::from_utf8_lossy(&bytes)
                .parse::<u64>()
                .map_err(|e| RoomError::Storage(StorageError::IOError(e.to_string()))),
            Err(StorageError::NotFound(_)) => Ok(0),
            Err(e) => Err(RoomError::Storage(e)),
        }
    }

    /// Allocates the next `seq`, extracts any `@mention`, persists, and
    /// returns the resulting message.
    ///
    /// Allocation is serialized by a per-room lock so concurrent
    /// broadcasts never observe or assign the same `seq` twice.
    pub async fn broadcast(&self, from_agent: &str, content: &str) -> RoomResult<Message> {
        let _guard = self.seq_lock.lock().await;
        let seq = self.next_seq().await? + 1;
        let message = Message {
            seq,
            from_agent: from_agent.to_string(),
            content: content.to_string(),
            timestamp: self.clock.now_secs(),
            mention: masc_mention::extract(content),
        };
        let bytes = serde_json::to_vec(&message)
            .map_err(|e| RoomError::Storage(StorageError::IOError(e.to_string())))?;
        self.backend.set(&message_key(seq), bytes).await?;
        self.backend
            .set(NEXT_SEQ_KEY, seq.to_string().into_bytes())
            .await?;
        Ok(message)
    }

    /// Fetches the message with the given `seq`.
    pub async fn get_message(&self, seq: u64) -> RoomResult<Message> {
        match self.backend.get(&message_key(seq)).await {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| RoomError::Storage(StorageError::IOError(e.to_string()))),
            Err(StorageError::NotFound(_)) => Err(RoomError::MessageNotFound(seq)),
            Err(e) => Err(RoomError::Storage(e)),
        }
    }

    /// Lists messages with `seq > since_seq`, up to `limit`, in ascending
    /// order.
    pub async fn list_messages(&self, since_seq: u64, limit: usize) -> RoomResult<Vec<Message>> {
        let mut keys = self.backend.list(MESSAGES_PREFIX).await?;
        keys.sort();
        let mut out = Vec::new();
        for key in keys {
            let Some(seq_str) = key.rsplit(':').next() else {
                continue;
            };
            let Ok(seq) = seq_str.parse::<u64>() else {
                continue; // skips the `next_seq` counter key itself
            };
            if seq <= since_seq {
                continue;
            }
            out.push(self.get_message(seq).await?);
            if out.len() >= limit {
                break;
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use crate::room::tests::room;

    #[tokio::test]
    async fn seq_is_monotone_and_contiguous() {
        let room = room();
        let a = room.broadcast("claude", "hello").await.unwrap();
        let b = room.broadcast("claude", "world").await.unwrap();
        assert_eq!(a.seq, 1);
        assert_eq!(b.seq, 2);
    }

    #[tokio::test]
    async fn mention_is_extracted() {
        let room = room();
        let msg = room.broadcast("claude", "@gemini please review").await.unwrap();
        assert_eq!(msg.mention, Some("gemini".to_string()));
    }

    #[tokio::test]
    async fn list_respects_since_and_limit() {
        let room = room();
        for i in 0..5 {
            room.broadcast("claude", &format!("msg{i}")).await.unwrap();
        }
        let page = room.list_messages(1, 2).await.unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].seq, 2);
        assert_eq!(page[1].seq, 3);
    }

    #[tokio::test]
    async fn get_missing_seq_is_not_found() {
        let room = room();
        assert!(room.get_message(1).await.is_err());
    }
}
