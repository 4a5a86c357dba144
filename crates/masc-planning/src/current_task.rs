//! The process-level "current task" pointer, used to let tool calls omit
//! an explicit `task_id` once one has been selected.

use tokio::sync::RwLock;

use crate::error::{PlanningError, PlanningResult};

/// Holds at most one "currently selected" task id.
///
/// A single instance is shared across a room's tool handlers (e.g. the
/// `task` and `planning` tool groups), rather than imported as a bare
/// global, so its lifetime is explicit and test instances don't leak
/// state between each other.
#[derive(Default)]
pub struct CurrentTask {
    current: RwLock<Option<String>>,
}

impl CurrentTask {
    /// Creates a pointer with no task selected.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the current task id.
    pub async fn set_current_task(&self, task_id: impl Into<String>) {
        *self.current.write().await = Some(task_id.into());
    }

    /// Returns the current task id, if any.
    pub async fn get_current_task(&self) -> Option<String> {
        self.current.read().await.clone()
    }

    /// Clears the current task id.
    pub async fn clear_current_task(&self) {
        *self.current.write().await = None;
    }

    /// Resolves a task id: `explicit` if given, otherwise the current
    /// task, otherwise [`PlanningError::NoCurrentTask`].
    pub async fn resolve_task_id(&self, explicit: Option<&str>) -> PlanningResult<String> {
        if let Some(id) = explicit {
            return Ok(id.to_string());
        }
        self.get_current_task().await.ok_or(PlanningError::NoCurrentTask)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn explicit_id_wins_over_current() {
        let current = CurrentTask::new();
        current.set_current_task("t1").await;
        assert_eq!(current.resolve_task_id(Some("t2")).await.unwrap(), "t2");
    }

    #[tokio::test]
    async fn falls_back_to_current_task() {
        let current = CurrentTask::new();
        current.set_current_task("t1").await;
        assert_eq!(current.resolve_task_id(None).await.unwrap(), "t1");
    }

    #[tokio::test]
    async fn errors_with_neither() {
        let current = CurrentTask::new();
        assert!(matches!(
            current.resolve_task_id(None).await,
            Err(PlanningError::NoCurrentTask)
        ));
    }

    #[tokio::test]
    async fn clear_removes_current() {
        let current = CurrentTask::new();
        current.set_current_task("t1").await;
        current.clear_current_task().await;
        assert!(current.get_current_task().await.is_none());
    }
}
