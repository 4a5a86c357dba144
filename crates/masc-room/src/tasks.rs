//! The task state machine: `Todo -> InProgress -> {Completed, Cancelled}`.

use masc_storage::StorageError;
use rand::RngCore;
use tracing::warn;

use crate::error::{RoomError, RoomResult};
use crate::keys::{TASKS_PREFIX, task_claim_key, task_key};
use crate::room::Room;
use crate::types::{Task, TaskStatus};

fn generate_task_id() -> String {
    let mut bytes = [0u8; 6];
    rand::thread_rng().fill_bytes(&mut bytes);
    format!("task-{}", hex::encode(bytes))
}

impl Room {
    /// Creates a new `Todo` task.
    pub async fn create_task(
        &self,
        title: impl Into<String>,
        description: impl Into<String>,
        priority: i64,
        files: Vec<String>,
        worktree: Option<String>,
    ) -> RoomResult<Task> {
        let task = Task {
            id: generate_task_id(),
            title: title.into(),
            description: description.into(),
            priority,
            status: TaskStatus::Todo,
            files,
            created_at: self.clock.now_secs(),
            worktree,
        };
        self.save_task(&task).await?;
        Ok(task)
    }

    async fn save_task(&self, task: &Task) -> RoomResult<()> {
        let bytes = serde_json::to_vec(task)
            .map_err(|e| RoomError::Storage(StorageError::IOError(e.to_string())))?;
        self.backend.set(&task_key(&task.id), bytes).await?;
        Ok(())
    }

    /// Fetches the task record for `id`.
    pub async fn get_task(&self, id: &str) -> RoomResult<Task> {
        match self.backend.get(&task_key(id)).await {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| RoomError::Storage(StorageError::IOError(e.to_string()))),
            Err(StorageError::NotFound(_)) => Err(RoomError::TaskNotFound(id.to_string())),
            Err(e) => Err(RoomError::Storage(e)),
        }
    }

    /// Lists every task.
    pub async fn list_tasks(&self) -> RoomResult<Vec<Task>> {
        let mut keys = self.backend.list(TASKS_PREFIX).await?;
        keys.retain(|k| !k.ends_with(":claim"));
        let mut tasks = Vec::new();
        for key in keys {
            if let Ok(bytes) = self.backend.get(&key).await {
                if let Ok(task) = serde_json::from_slice(&bytes) {
                    tasks.push(task);
                }
            }
        }
        Ok(tasks)
    }

    /// Claims `id` for `agent`.
    ///
    /// Only succeeds from `Todo`. Exclusivity under concurrent claimants
    /// is enforced by a `set_if_not_exists` claim marker, not by the
    /// status check alone: two readers can both observe `Todo`, but only
    /// one can win the marker create. The losing caller's marker write
    /// fails, and the status write it would otherwise have made is never
    /// attempted, so a lost race never corrupts the task record.
    pub async fn claim_task(&self, id: &str, agent: &str) -> RoomResult<Task> {
        self.get_agent(agent)
            .await
            .map_err(|_| RoomError::TaskNotClaimable(id.to_string()))?;
        let mut task = self.get_task(id).await?;
        if !matches!(task.status, TaskStatus::Todo) {
            return Err(RoomError::TaskNotClaimable(id.to_string()));
        }
        let claim_key = task_claim_key(id);
        match self
            .backend
            .set_if_not_exists(&claim_key, agent.as_bytes().to_vec())
            .await
        {
            Ok(true) => {}
            Err(StorageError::AlreadyExists(_)) => {
                return Err(RoomError::TaskNotClaimable(id.to_string()));
            }
            Ok(false) => unreachable!("set_if_not_exists returns Err on conflict, not Ok(false)"),
            Err(e) => return Err(RoomError::Storage(e)),
        }
        task.status = TaskStatus::InProgress {
            agent: agent.to_string(),
        };
        // One retry on the follow-up write: the claim marker is already
        // the atomicity boundary, so a transient storage failure here
        // (not a lost race) is the only thing worth retrying.
        if self.save_task(&task).await.is_err() {
            self.save_task(&task).await?;
        }
        Ok(task)
    }

    /// Completes `id`. Only the agent holding the claim may complete it.
    pub async fn complete_task(&self, id: &str, agent: &str) -> RoomResult<Task> {
        let mut task = self.get_task(id).await?;
        match &task.status {
            TaskStatus::InProgress { agent: owner } if owner == agent => {
                task.status = TaskStatus::Completed {
                    agent: agent.to_string(),
                };
                self.save_task(&task).await?;
                Ok(task)
            }
            _ => Err(RoomError::TaskNotClaimable(id.to_string())),
        }
    }

    /// Cancels `id` with `reason`.
    ///
    /// Cancelling a `Todo`/`InProgress` task is a legal, recorded
    /// transition. Cancelling an already-terminal (`Completed`/
    /// `Cancelled`) task is a no-op that logs a warning rather than
    /// erroring.
    pub async fn cancel_task(&self, id: &str, reason: impl Into<String>) -> RoomResult<Task> {
        let mut task = self.get_task(id).await?;
        match &task.status {
            TaskStatus::Completed { .. } | TaskStatus::Cancelled { .. } => {
                warn!(task_id = %id, "cancel on an already-terminal task is a no-op");
                Ok(task)
            }
            _ => {
                task.status = TaskStatus::Cancelled {
                    reason: reason.into(),
                };
                self.save_task(&task).await?;
                Ok(task)
            }
        }
    }
}
