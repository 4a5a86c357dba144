//! Append-only, hash-chained persistence over a [`Backend`].

use std::sync::Arc;

use masc_core::Clock;
use masc_storage::{Backend, StorageError};
use tracing::warn;

use crate::entry::{AuditEntry, GENESIS_HASH};
use crate::error::{AuditError, AuditResult};

const KEY_NEXT_SEQ: &str = "audit:next_seq";
const KEY_CHAIN_HEAD: &str = "audit:chain_head";

fn entry_key(seq: u64) -> String {
    format!("audit:entries:{seq:020}")
}

/// An append-only audit log: every `append` call hashes the new entry onto
/// the previous chain head, so tampering with any earlier entry is
/// detectable by recomputing the chain.
pub struct AuditLog {
    backend: Arc<dyn Backend>,
    clock: Arc<dyn Clock>,
    // Sequence allocation and chain-head advancement must happen together;
    // this lock makes "read head, append, advance head" atomic per
    // process, matching the room's message-seq allocation pattern.
    append_lock: tokio::sync::Mutex<()>,
}

impl AuditLog {
    /// Creates a log over `backend`, timestamping entries with `clock`.
    pub fn new(backend: Arc<dyn Backend>, clock: Arc<dyn Clock>) -> Self {
        Self {
            backend,
            clock,
            append_lock: tokio::sync::Mutex::new(()),
        }
    }

    async fn next_seq(&self) -> AuditResult<u64> {
        match self.backend.get(KEY_NEXT_SEQ).await {
            Ok(bytes) => String::from_utf8_lossy(&bytes)
                .parse::<u64>()
                .map_err(|e| AuditError::Corrupt(e.to_string())),
            Err(StorageError::NotFound(_)) => Ok(0),
            Err(e) => Err(AuditError::Storage(e)),
        }
    }

    async fn chain_head(&self) -> AuditResult<String> {
        match self.backend.get(KEY_CHAIN_HEAD).await {
            Ok(bytes) => Ok(String::from_utf8_lossy(&bytes).into_owned()),
            Err(StorageError::NotFound(_)) => Ok(GENESIS_HASH.to_string()),
            Err(e) => Err(AuditError::Storage(e)),
        }
    }

    /// Appends a new entry, chaining it onto the current head.
    pub async fn append(
        &self,
        agent: impl Into<String>,
        event_type: impl Into<String>,
        success: bool,
        detail: Option<String>,
    ) -> AuditResult<AuditEntry> {
        let _guard = self.append_lock.lock().await;
        let seq = self.next_seq().await? + 1;
        let prev_hash = self.chain_head().await?;
        let entry = AuditEntry::new(
            seq,
            self.clock.now_secs(),
            agent,
            event_type,
            success,
            detail,
            prev_hash,
        );
        let bytes = serde_json::to_vec(&entry)
            .map_err(|e| AuditError::Storage(StorageError::IOError(e.to_string())))?;
        self.backend.set(&entry_key(seq), bytes).await?;
        self.backend
            .set(KEY_NEXT_SEQ, seq.to_string().into_bytes())
            .await?;
        self.backend
            .set(KEY_CHAIN_HEAD, entry.hash.clone().into_bytes())
            .await?;
        Ok(entry)
    }

    /// Reads the entry at `seq`.
    pub async fn get(&self, seq: u64) -> AuditResult<AuditEntry> {
        match self.backend.get(&entry_key(seq)).await {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| AuditError::Corrupt(e.to_string())),
            Err(StorageError::NotFound(_)) => Err(AuditError::NotFound(seq)),
            Err(e) => Err(AuditError::Storage(e)),
        }
    }

    /// Lists entries starting after `since_seq`, up to `limit` entries.
    pub async fn list(&self, since_seq: u64, limit: usize) -> AuditResult<Vec<AuditEntry>> {
        let mut keys = self.backend.list("audit:entries:").await?;
        keys.sort();
        let mut out = Vec::new();
        for key in keys {
            let Some(seq_str) = key.rsplit(':').next() else {
                continue;
            };
            let Ok(seq) = seq_str.parse::<u64>() else {
                continue;
            };
            if seq <= since_seq {
                continue;
            }
            out.push(self.get(seq).await?);
            if out.len() >= limit {
                break;
            }
        }
        Ok(out)
    }

    /// Verifies the full chain from `1` through the current head. Returns
    /// `Ok(true)` if every entry's hash matches its content and chains
    /// correctly onto its predecessor.
    pub async fn verify_chain(&self) -> AuditResult<bool> {
        let entries = self.list(0, usize::MAX).await?;
        let mut expected_prev = GENESIS_HASH.to_string();
        for entry in &entries {
            if !entry.verify() || entry.prev_hash != expected_prev {
                warn!(seq = entry.seq, "audit chain verification failed");
                return Ok(false);
            }
            expected_prev = entry.hash.clone();
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use masc_core::SystemClock;
    use masc_storage::MemoryBackend;

    fn log() -> AuditLog {
        AuditLog::new(Arc::new(MemoryBackend::new()), Arc::new(SystemClock))
    }

    #[tokio::test]
    async fn appends_are_sequential_and_chained() {
        let log = log();
        let a = log.append("claude", "token_created", true, None).await.unwrap();
        let b = log.append("claude", "task_claimed", true, None).await.unwrap();
        assert_eq!(a.seq, 1);
        assert_eq!(b.seq, 2);
        assert_eq!(b.prev_hash, a.hash);
    }

    #[tokio::test]
    async fn verify_chain_detects_tampering() {
        let log = log();
        log.append("claude", "a", true, None).await.unwrap();
        log.append("claude", "b", true, None).await.unwrap();
        assert!(log.verify_chain().await.unwrap());

        let mut tampered = log.get(1).await.unwrap();
        tampered.success = false;
        let bytes = serde_json::to_vec(&tampered).unwrap();
        log.backend.set(&entry_key(1), bytes).await.unwrap();
        assert!(!log.verify_chain().await.unwrap());
    }

    #[tokio::test]
    async fn list_respects_since_and_limit() {
        let log = log();
        for i in 0..5 {
            log.append("a", format!("ev{i}"), true, None).await.unwrap();
        }
        let page = log.list(1, 2).await.unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].seq, 2);
        assert_eq!(page[1].seq, 3);
    }
}
