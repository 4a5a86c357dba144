use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::backend::{Backend, HealthStatus};
use crate::error::{StorageError, StorageResult, validate_key};

/// Non-persistent [`Backend`] backed by an in-process map.
///
/// Used for tests and ephemeral rooms that do not need a filesystem
/// footprint.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    map: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryBackend {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Backend for MemoryBackend {
    async fn get(&self, key: &str) -> StorageResult<Vec<u8>> {
        validate_key(key)?;
        self.map
            .read()
            .await
            .get(key)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(key.to_string()))
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> StorageResult<()> {
        validate_key(key)?;
        self.map.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn set_if_not_exists(&self, key: &str, value: Vec<u8>) -> StorageResult<bool> {
        validate_key(key)?;
        let mut guard = self.map.write().await;
        if guard.contains_key(key) {
            return Err(StorageError::AlreadyExists(key.to_string()));
        }
        guard.insert(key.to_string(), value);
        Ok(true)
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        validate_key(key)?;
        self.map.write().await.remove(key);
        Ok(())
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        validate_key(key)?;
        Ok(self.map.read().await.contains_key(key))
    }

    async fn list(&self, prefix: &str) -> StorageResult<Vec<String>> {
        Ok(self
            .map
            .read()
            .await
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect())
    }

    async fn health_check(&self) -> StorageResult<HealthStatus> {
        Ok(HealthStatus::healthy())
    }
}
