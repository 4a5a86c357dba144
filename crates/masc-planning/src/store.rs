//! Persisted per-task planning artifacts.

use std::sync::Arc;

use masc_core::Clock;
use masc_storage::{Backend, StorageError};

use crate::error::{PlanningError, PlanningResult};
use crate::types::{ErrorEntry, PlanningContext};

fn context_key(task_id: &str) -> String {
    format!("planning:{task_id}:context.json")
}

fn plan_md_key(task_id: &str) -> String {
    format!("planning:{task_id}:task_plan.md")
}

fn notes_md_key(task_id: &str) -> String {
    format!("planning:{task_id}:notes.md")
}

fn errors_md_key(task_id: &str) -> String {
    format!("planning:{task_id}:errors.md")
}

fn deliverable_md_key(task_id: &str) -> String {
    format!("planning:{task_id}:deliverable.md")
}

/// Owns per-task [`PlanningContext`]s over a [`Backend`].
///
/// `context.json` is the canonical record; the sibling `task_plan.md`,
/// `notes.md`, `errors.md`, `deliverable.md` keys are rendered views kept
/// in sync on every mutation, matching §6's persisted filesystem layout.
pub struct PlanningStore {
    backend: Arc<dyn Backend>,
    clock: Arc<dyn Clock>,
}

impl PlanningStore {
    /// Creates a store over `backend`, timestamping mutations with
    /// `clock`.
    pub fn new(backend: Arc<dyn Backend>, clock: Arc<dyn Clock>) -> Self {
        Self { backend, clock }
    }

    /// Creates an empty planning context for `task_id`. Idempotent: if one
    /// already exists it is returned unchanged.
    pub async fn init(&self, task_id: &str) -> PlanningResult<PlanningContext> {
        match self.load(task_id).await {
            Ok(existing) => Ok(existing),
            Err(PlanningError::NotFound(_)) => {
                let ctx = PlanningContext::new(task_id, self.clock.now_secs());
                self.save(&ctx).await?;
                Ok(ctx)
            }
            Err(e) => Err(e),
        }
    }

    /// Loads the planning context for `task_id`.
    pub async fn load(&self, task_id: &str) -> PlanningResult<PlanningContext> {
        match self.backend.get(&context_key(task_id)).await {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| PlanningError::Storage(StorageError::IOError(e.to_string()))),
            Err(StorageError::NotFound(_)) => Err(PlanningError::NotFound(task_id.to_string())),
            Err(e) => Err(PlanningError::Storage(e)),
        }
    }

    async fn save(&self, ctx: &PlanningContext) -> PlanningResult<()> {
        let bytes = serde_json::to_vec(ctx)
            .map_err(|e| PlanningError::Storage(StorageError::IOError(e.to_string())))?;
        self.backend.set(&context_key(&ctx.task_id), bytes).await?;
        self.backend
            .set(&plan_md_key(&ctx.task_id), ctx.task_plan.clone().into_bytes())
            .await?;
        self.backend
            .set(&notes_md_key(&ctx.task_id), ctx.notes.join("\n\n").into_bytes())
            .await?;
        let errors_md = ctx
            .errors
            .iter()
            .map(|e| format!("- [{}] {}: {}", if e.resolved { "x" } else { " " }, e.error_type, e.message))
            .collect::<Vec<_>>()
            .join("\n");
        self.backend.set(&errors_md_key(&ctx.task_id), errors_md.into_bytes()).await?;
        self.backend
            .set(&deliverable_md_key(&ctx.task_id), ctx.deliverable.clone().into_bytes())
            .await?;
        Ok(())
    }

    /// Replaces the plan text for `task_id`.
    pub async fn update_plan(&self, task_id: &str, content: impl Into<String>) -> PlanningResult<PlanningContext> {
        let mut ctx = self.load(task_id).await?;
        ctx.task_plan = content.into();
        ctx.updated_at = self.clock.now_secs();
        self.save(&ctx).await?;
        Ok(ctx)
    }

    /// Appends `note` to `task_id`'s notes.
    pub async fn add_note(&self, task_id: &str, note: impl Into<String>) -> PlanningResult<PlanningContext> {
        let mut ctx = self.load(task_id).await?;
        ctx.notes.push(note.into());
        ctx.updated_at = self.clock.now_secs();
        self.save(&ctx).await?;
        Ok(ctx)
    }

    /// Sets the deliverable text for `task_id`.
    pub async fn set_deliverable(&self, task_id: &str, content: impl Into<String>) -> PlanningResult<PlanningContext> {
        let mut ctx = self.load(task_id).await?;
        ctx.deliverable = content.into();
        ctx.updated_at = self.clock.now_secs();
        self.save(&ctx).await?;
        Ok(ctx)
    }

    /// Appends an unresolved error entry to `task_id`'s error log.
    pub async fn add_error(
        &self,
        task_id: &str,
        error_type: impl Into<String>,
        message: impl Into<String>,
        context: Option<String>,
    ) -> PlanningResult<PlanningContext> {
        let mut ctx = self.load(task_id).await?;
        ctx.errors.push(ErrorEntry {
            timestamp: self.clock.now_secs(),
            error_type: error_type.into(),
            message: message.into(),
            context,
            resolved: false,
        });
        ctx.updated_at = self.clock.now_secs();
        self.save(&ctx).await?;
        Ok(ctx)
    }

    /// Marks the error at `index` as resolved.
    ///
    /// # Errors
    ///
    /// [`PlanningError::ErrorIndexOutOfRange`] if `index` is past the end
    /// of the error list.
    pub async fn resolve_error(&self, task_id: &str, index: usize) -> PlanningResult<PlanningContext> {
        let mut ctx = self.load(task_id).await?;
        let len = ctx.errors.len();
        let entry = ctx
            .errors
            .get_mut(index)
            .ok_or(PlanningError::ErrorIndexOutOfRange {
                task_id: task_id.to_string(),
                index,
                len,
            })?;
        entry.resolved = true;
        ctx.updated_at = self.clock.now_secs();
        self.save(&ctx).await?;
        Ok(ctx)
    }
}
