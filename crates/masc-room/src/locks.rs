//! File-locking operations: exclusivity enforced via `set_if_not_exists`.

use masc_storage::StorageError;

use crate::error::{RoomError, RoomResult};
use crate::keys::lock_key;
use crate::room::Room;
use crate::types::Lock;

impl Room {
    /// Attempts to acquire `resource` for `owner`.
    ///
    /// Returns `Ok(Some(lock))` on success (including a same-owner
    /// re-acquire, which is a no-op returning the existing lock).
    /// Returns `Ok(None)` if a different owner already holds it.
    pub async fn acquire_lock(&self, resource: &str, owner: &str) -> RoomResult<Option<Lock>> {
        let key = lock_key(resource);
        let lock = Lock {
            resource: resource.to_string(),
            owner: owner.to_string(),
            acquired_at: self.clock.now_secs(),
            expires_at: None,
        };
        let bytes = serde_json::to_vec(&lock)
            .map_err(|e| RoomError::Storage(StorageError::IOError(e.to_string())))?;
        match self.backend.set_if_not_exists(&key, bytes).await {
            Ok(true) => Ok(Some(lock)),
            Ok(false) => unreachable!("set_if_not_exists returns Err on conflict, not Ok(false)"),
            Err(StorageError::AlreadyExists(_)) => {
                let existing = self.get_lock(resource).await?;
                if existing.owner == owner {
                    Ok(Some(existing))
                } else {
                    Ok(None)
                }
            }
            Err(e) => Err(RoomError::Storage(e)),
        }
    }

    /// Reads the current lock on `resource`, if any.
    pub async fn get_lock(&self, resource: &str) -> RoomResult<Lock> {
        match self.backend.get(&lock_key(resource)).await {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| RoomError::Storage(StorageError::IOError(e.to_string()))),
            Err(StorageError::NotFound(_)) => Err(RoomError::LockHeld(resource.to_string())),
            Err(e) => Err(RoomError::Storage(e)),
        }
    }

    /// Releases `resource` if `owner` currently holds it. Idempotent:
    /// releasing an unheld or differently-owned lock is a no-op.
    pub async fn release_lock(&self, resource: &str, owner: &str) -> RoomResult<()> {
        match self.get_lock(resource).await {
            Ok(lock) if lock.owner == owner => {
                self.backend.delete(&lock_key(resource)).await?;
                Ok(())
            }
            Ok(_) | Err(RoomError::LockHeld(_)) => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// Lists every currently held lock.
    pub async fn list_locks(&self) -> RoomResult<Vec<Lock>> {
        let keys = self.backend.list(crate::keys::LOCKS_PREFIX).await?;
        let mut locks = Vec::new();
        for key in keys {
            if let Ok(bytes) = self.backend.get(&key).await {
                if let Ok(lock) = serde_json::from_slice(&bytes) {
                    locks.push(lock);
                }
            }
        }
        Ok(locks)
    }
}

#[cfg(test)]
mod tests {
    use crate::room::tests::room;

    #[tokio::test]
    async fn acquire_then_second_owner_fails() {
        let room = room();
        assert!(room.acquire_lock("file.rs", "a").await.unwrap().is_some());
        assert!(room.acquire_lock("file.rs", "b").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn same_owner_reacquire_is_a_no_op() {
        let room = room();
        let first = room.acquire_lock("file.rs", "a").await.unwrap().unwrap();
        let second = room.acquire_lock("file.rs", "a").await.unwrap().unwrap();
        assert_eq!(first.acquired_at, second.acquired_at);
    }

    #[tokio::test]
    async fn release_then_others_can_acquire() {
        let room = room();
        room.acquire_lock("file.rs", "a").await.unwrap();
        room.release_lock("file.rs", "a").await.unwrap();
        assert!(room.acquire_lock("file.rs", "b").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn release_is_idempotent() {
        let room = room();
        room.release_lock("file.rs", "a").await.unwrap();
        room.acquire_lock("file.rs", "a").await.unwrap();
        room.release_lock("file.rs", "b").await.unwrap(); // wrong owner, no-op
        assert!(room.acquire_lock("file.rs", "b").await.unwrap().is_none());
    }
}
