//! Persisted handover records: creation, claim, and queries.

use std::sync::Arc;

use masc_core::Clock;
use masc_storage::{Backend, StorageError};
use rand::RngCore;

use crate::error::{HandoverError, HandoverResult};
use crate::types::{HandoverRecord, TriggerReason, trigger_reason_to_string};

const PREFIX: &str = "handovers:";

fn record_key(id: &str) -> String {
    format!("{PREFIX}{id}")
}

fn claim_key(id: &str) -> String {
    format!("{PREFIX}{id}:claim")
}

fn generate_id() -> String {
    let mut bytes = [0u8; 8];
    rand::thread_rng().fill_bytes(&mut bytes);
    format!("handover-{}", hex::encode(bytes))
}

/// The extra narrative/detail fields a handover carries beyond its
/// headline `(from_agent, task_id, session_id, reason)`.
#[derive(Debug, Clone, Default)]
pub struct HandoverDetails {
    /// What the outgoing agent was trying to accomplish.
    pub current_goal: String,
    /// A prose summary of progress so far.
    pub progress_summary: String,
    /// Steps already completed.
    pub completed_steps: Vec<String>,
    /// Steps still outstanding.
    pub pending_steps: Vec<String>,
    /// Decisions a successor should not re-litigate.
    pub key_decisions: Vec<String>,
    /// Assumptions the outgoing agent made.
    pub assumptions: Vec<String>,
    /// Things a successor should watch out for.
    pub warnings: Vec<String>,
    /// Errors encountered that were never resolved.
    pub unresolved_errors: Vec<String>,
    /// Files touched during the outgoing agent's work.
    pub modified_files: Vec<String>,
    /// Context window usage at hand-off time, as a percent.
    pub context_usage_percent: u32,
}

/// Owns [`HandoverRecord`]s persisted over a [`Backend`].
pub struct HandoverStore {
    backend: Arc<dyn Backend>,
    clock: Arc<dyn Clock>,
}

impl HandoverStore {
    /// Creates a store over `backend`, timestamping records with `clock`.
    pub fn new(backend: Arc<dyn Backend>, clock: Arc<dyn Clock>) -> Self {
        Self { backend, clock }
    }

    /// Builds and persists a new handover record, with `to_agent` unset
    /// ("pending, claimable by any agent").
    pub async fn create_handover(
        &self,
        from_agent: impl Into<String>,
        task_id: impl Into<String>,
        session_id: impl Into<String>,
        reason: &TriggerReason,
        details: HandoverDetails,
    ) -> HandoverResult<HandoverRecord> {
        let record = HandoverRecord {
            id: generate_id(),
            from_agent: from_agent.into(),
            to_agent: None,
            task_id: task_id.into(),
            session_id: session_id.into(),
            current_goal: details.current_goal,
            progress_summary: details.progress_summary,
            completed_steps: details.completed_steps,
            pending_steps: details.pending_steps,
            key_decisions: details.key_decisions,
            assumptions: details.assumptions,
            warnings: details.warnings,
            unresolved_errors: details.unresolved_errors,
            modified_files: details.modified_files,
            created_at: self.clock.now_secs(),
            context_usage_percent: details.context_usage_percent,
            handover_reason: trigger_reason_to_string(reason),
        };
        self.save_handover(&record).await?;
        Ok(record)
    }

    /// Persists `record` as-is (used by `create_handover` and by
    /// `claim_handover` after assigning `to_agent`).
    pub async fn save_handover(&self, record: &HandoverRecord) -> HandoverResult<()> {
        let bytes = serde_json::to_vec(record)
            .map_err(|e| HandoverError::Storage(StorageError::IOError(e.to_string())))?;
        self.backend.set(&record_key(&record.id), bytes).await?;
        Ok(())
    }

    /// Loads the handover record with `id`.
    pub async fn load_handover(&self, id: &str) -> HandoverResult<HandoverRecord> {
        match self.backend.get(&record_key(id)).await {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| HandoverError::Storage(StorageError::IOError(e.to_string()))),
            Err(StorageError::NotFound(_)) => Err(HandoverError::NotFound(id.to_string())),
            Err(e) => Err(HandoverError::Storage(e)),
        }
    }

    /// Lists every handover record.
    pub async fn list_handovers(&self) -> HandoverResult<Vec<HandoverRecord>> {
        let keys = self.backend.list(PREFIX).await?;
        let mut out = Vec::new();
        for key in keys {
            if key.ends_with(":claim") {
                continue;
            }
            if let Ok(bytes) = self.backend.get(&key).await {
                if let Ok(record) = serde_json::from_slice(&bytes) {
                    out.push(record);
                }
            }
        }
        Ok(out)
    }

    /// Lists handover records with no `to_agent` yet.
    pub async fn get_pending_handovers(&self) -> HandoverResult<Vec<HandoverRecord>> {
        Ok(self
            .list_handovers()
            .await?
            .into_iter()
            .filter(|r| r.to_agent.is_none())
            .collect())
    }

    /// Atomically assigns `to_agent` to the handover `id`.
    ///
    /// Exclusivity is enforced the same way task claims are: a
    /// `set_if_not_exists` marker, not a read-then-write on the record
    /// itself, so two concurrent claimants can never both win.
    pub async fn claim_handover(&self, id: &str, agent_name: &str) -> HandoverResult<HandoverRecord> {
        let mut record = self.load_handover(id).await?;
        if record.to_agent.is_some() {
            return Err(HandoverError::AlreadyClaimed(id.to_string()));
        }
        match self
            .backend
            .set_if_not_exists(&claim_key(id), agent_name.as_bytes().to_vec())
            .await
        {
            Ok(true) => {}
            Err(StorageError::AlreadyExists(_)) => {
                return Err(HandoverError::AlreadyClaimed(id.to_string()));
            }
            Ok(false) => unreachable!("set_if_not_exists returns Err on conflict, not Ok(false)"),
            Err(e) => return Err(HandoverError::Storage(e)),
        }
        record.to_agent = Some(agent_name.to_string());
        self.save_handover(&record).await?;
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use masc_core::SystemClock;
    use masc_storage::MemoryBackend;

    fn store() -> HandoverStore {
        HandoverStore::new(Arc::new(MemoryBackend::new()), Arc::new(SystemClock))
    }

    #[tokio::test]
    async fn create_then_pending_lists_it() {
        let store = store();
        let record = store
            .create_handover("claude", "t1", "s1", &TriggerReason::Explicit, HandoverDetails::default())
            .await
            .unwrap();
        assert_eq!(record.handover_reason, "explicit");
        assert!(record.to_agent.is_none());
        let pending = store.get_pending_handovers().await.unwrap();
        assert_eq!(pending.len(), 1);
    }

    #[tokio::test]
    async fn claim_then_second_claim_fails() {
        let store = store();
        let record = store
            .create_handover("claude", "t1", "s1", &TriggerReason::Explicit, HandoverDetails::default())
            .await
            .unwrap();
        let claimed = store.claim_handover(&record.id, "gemini").await.unwrap();
        assert_eq!(claimed.to_agent, Some("gemini".to_string()));
        assert!(matches!(
            store.claim_handover(&record.id, "codex").await,
            Err(HandoverError::AlreadyClaimed(_))
        ));
    }

    #[tokio::test]
    async fn claimed_handovers_are_not_pending() {
        let store = store();
        let record = store
            .create_handover("claude", "t1", "s1", &TriggerReason::TaskComplete, HandoverDetails::default())
            .await
            .unwrap();
        store.claim_handover(&record.id, "gemini").await.unwrap();
        assert!(store.get_pending_handovers().await.unwrap().is_empty());
    }

    #[test]
    fn reason_strings_are_stable() {
        assert_eq!(trigger_reason_to_string(&TriggerReason::ContextLimit(90)), "context_limit_90");
        assert_eq!(trigger_reason_to_string(&TriggerReason::Timeout(30)), "timeout_30s");
        assert_eq!(trigger_reason_to_string(&TriggerReason::Explicit), "explicit");
        assert_eq!(
            trigger_reason_to_string(&TriggerReason::FatalError("oom".to_string())),
            "error: oom"
        );
        assert_eq!(trigger_reason_to_string(&TriggerReason::TaskComplete), "task_complete");
    }

    #[test]
    fn generated_ids_are_prefixed_and_unique() {
        let a = generate_id();
        let b = generate_id();
        assert!(a.starts_with("handover-"));
        assert_ne!(a, b);
    }
}
