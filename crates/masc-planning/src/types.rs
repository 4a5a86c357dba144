//! Per-task planning artifacts.

use serde::{Deserialize, Serialize};

/// One entry in a [`PlanningContext`]'s error log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEntry {
    /// Unix seconds when the error was recorded.
    pub timestamp: u64,
    /// A short category, e.g. `"compile_error"`, `"test_failure"`.
    pub error_type: String,
    /// The error message itself.
    pub message: String,
    /// Optional extra context (stack trace, failing input, ...).
    pub context: Option<String>,
    /// Whether the error has since been resolved.
    pub resolved: bool,
}

/// All planning artifacts for one task: plan, ordered notes, an ordered
/// error log, and a deliverable summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanningContext {
    /// The task these artifacts belong to.
    pub task_id: String,
    /// The current plan text.
    pub task_plan: String,
    /// Freeform notes, oldest first.
    pub notes: Vec<String>,
    /// Errors encountered, oldest first.
    pub errors: Vec<ErrorEntry>,
    /// The final deliverable description, once set.
    pub deliverable: String,
    /// Unix seconds at `init`.
    pub created_at: u64,
    /// Unix seconds at the most recent mutation.
    pub updated_at: u64,
}

impl PlanningContext {
    pub(crate) fn new(task_id: impl Into<String>, now: u64) -> Self {
        Self {
            task_id: task_id.into(),
            task_plan: String::new(),
            notes: Vec::new(),
            errors: Vec::new(),
            deliverable: String::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Renders every field of `ctx` as one markdown document.
#[must_use]
pub fn get_context_markdown(ctx: &PlanningContext) -> String {
    let notes = if ctx.notes.is_empty() {
        "_none_".to_string()
    } else {
        ctx.notes.iter().map(|n| format!("- {n}")).collect::<Vec<_>>().join("\n")
    };
    let errors = if ctx.errors.is_empty() {
        "_none_".to_string()
    } else {
        ctx.errors
            .iter()
            .enumerate()
            .map(|(i, e)| {
                format!(
                    "{i}. [{status}] ({ty}) {msg}{ctx}",
                    status = if e.resolved { "resolved" } else { "open" },
                    ty = e.error_type,
                    msg = e.message,
                    ctx = e.context.as_deref().map(|c| format!(" — {c}")).unwrap_or_default(),
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };
    format!(
        "# Planning context for {task_id}\n\n\
         ## Plan\n{plan}\n\n\
         ## Notes\n{notes}\n\n\
         ## Errors\n{errors}\n\n\
         ## Deliverable\n{deliverable}\n",
        task_id = ctx.task_id,
        plan = if ctx.task_plan.is_empty() { "_none_" } else { &ctx.task_plan },
        deliverable = if ctx.deliverable.is_empty() { "_none_" } else { &ctx.deliverable },
    )
}
