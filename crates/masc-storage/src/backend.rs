use async_trait::async_trait;

use crate::error::StorageResult;

/// Result of a [`Backend::health_check`] probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthStatus {
    /// Whether the backend is currently usable.
    pub is_healthy: bool,
    /// Human-readable detail (empty when healthy).
    pub detail: String,
}

impl HealthStatus {
    /// A healthy status with no detail.
    pub fn healthy() -> Self {
        Self {
            is_healthy: true,
            detail: String::new(),
        }
    }

    /// An unhealthy status carrying a reason.
    pub fn unhealthy(detail: impl Into<String>) -> Self {
        Self {
            is_healthy: false,
            detail: detail.into(),
        }
    }
}

/// A content-addressed key/value store.
///
/// Keys are opaque strings validated by [`masc_core::validate_identifier`];
/// colons inside a key are directory separators for the filesystem
/// implementation and carry no special meaning for the memory one. Both
/// implementations share this one contract so `masc-room` and friends can
/// be generic over the backend.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Reads the value stored under `key`.
    ///
    /// Returns [`crate::StorageError::NotFound`] if no value is stored.
    async fn get(&self, key: &str) -> StorageResult<Vec<u8>>;

    /// Overwrites the value stored under `key`, creating it if absent.
    async fn set(&self, key: &str, value: Vec<u8>) -> StorageResult<()>;

    /// Atomically creates `key` with `value` only if it does not already
    /// exist.
    ///
    /// Returns `Ok(true)` on insert; returns
    /// [`crate::StorageError::AlreadyExists`] if a value is already present.
    /// This is the primitive `masc-room` uses for lock acquisition and task
    /// claim serialization.
    async fn set_if_not_exists(&self, key: &str, value: Vec<u8>) -> StorageResult<bool>;

    /// Removes the value stored under `key`.
    ///
    /// Idempotent: deleting a missing key is not an error.
    async fn delete(&self, key: &str) -> StorageResult<()>;

    /// Checks whether a value is stored under `key`.
    async fn exists(&self, key: &str) -> StorageResult<bool>;

    /// Enumerates keys sharing `prefix`. Order is unspecified.
    async fn list(&self, prefix: &str) -> StorageResult<Vec<String>>;

    /// Reports whether the backend is currently usable.
    async fn health_check(&self) -> StorageResult<HealthStatus>;
}
