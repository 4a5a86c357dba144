//! `init_plan`, `load_plan`, `update_plan`, `add_note`, `set_deliverable`,
//! `add_error`, `resolve_error`, `get_plan_markdown`, `current_task_set`,
//! `current_task_get`, `current_task_clear`.

use async_trait::async_trait;
use masc_planning::get_context_markdown;
use serde_json::{Value, json};

use crate::args::{get_int_opt, get_string, get_string_opt};
use crate::context::DispatchContext;
use crate::tool_handler::ToolHandler;

async fn resolve_task_id(ctx: &DispatchContext, args: &Value) -> Result<String, String> {
    let explicit = get_string_opt(args, "task_id");
    ctx.current_task
        .resolve_task_id(explicit.as_deref())
        .await
        .map_err(|e| e.to_string())
}

/// Handles the `planning` tool group.
pub struct PlanningHandler;

#[async_trait]
impl ToolHandler for PlanningHandler {
    async fn dispatch(&self, ctx: &DispatchContext, name: &str, args: &Value) -> Option<(bool, String)> {
        match name {
            "init_plan" => {
                let task_id = get_string(args, "task_id", "");
                Some(match ctx.planning.init(&task_id).await {
                    Ok(plan) => (true, json!(plan).to_string()),
                    Err(e) => (false, e.to_string()),
                })
            }
            "load_plan" => {
                let task_id = match resolve_task_id(ctx, args).await {
                    Ok(id) => id,
                    Err(e) => return Some((false, e)),
                };
                Some(match ctx.planning.load(&task_id).await {
                    Ok(plan) => (true, json!(plan).to_string()),
                    Err(e) => (false, e.to_string()),
                })
            }
            "update_plan" => {
                let task_id = match resolve_task_id(ctx, args).await {
                    Ok(id) => id,
                    Err(e) => return Some((false, e)),
                };
                let content = get_string(args, "content", "");
                Some(match ctx.planning.update_plan(&task_id, content).await {
                    Ok(plan) => (true, json!(plan).to_string()),
                    Err(e) => (false, e.to_string()),
                })
            }
            "add_note" => {
                let task_id = match resolve_task_id(ctx, args).await {
                    Ok(id) => id,
                    Err(e) => return Some((false, e)),
                };
                let note = get_string(args, "note", "");
                Some(match ctx.planning.add_note(&task_id, note).await {
                    Ok(plan) => (true, json!(plan).to_string()),
                    Err(e) => (false, e.to_string()),
                })
            }
            "set_deliverable" => {
                let task_id = match resolve_task_id(ctx, args).await {
                    Ok(id) => id,
                    Err(e) => return Some((false, e)),
                };
                let content = get_string(args, "content", "");
                Some(match ctx.planning.set_deliverable(&task_id, content).await {
                    Ok(plan) => (true, json!(plan).to_string()),
                    Err(e) => (false, e.to_string()),
                })
            }
            "add_error" => {
                let task_id = match resolve_task_id(ctx, args).await {
                    Ok(id) => id,
                    Err(e) => return Some((false, e)),
                };
                let error_type = get_string(args, "error_type", "");
                let message = get_string(args, "message", "");
                let error_context = get_string_opt(args, "context");
                Some(match ctx.planning.add_error(&task_id, error_type, message, error_context).await {
                    Ok(plan) => (true, json!(plan).to_string()),
                    Err(e) => (false, e.to_string()),
                })
            }
            "resolve_error" => {
                let task_id = match resolve_task_id(ctx, args).await {
                    Ok(id) => id,
                    Err(e) => return Some((false, e)),
                };
                let index = get_int_opt(args, "index").unwrap_or(0).max(0) as usize;
                Some(match ctx.planning.resolve_error(&task_id, index).await {
                    Ok(plan) => (true, json!(plan).to_string()),
                    Err(e) => (false, e.to_string()),
                })
            }
            "get_plan_markdown" => {
                let task_id = match resolve_task_id(ctx, args).await {
                    Ok(id) => id,
                    Err(e) => return Some((false, e)),
                };
                Some(match ctx.planning.load(&task_id).await {
                    Ok(plan) => (true, get_context_markdown(&plan)),
                    Err(e) => (false, e.to_string()),
                })
            }
            "current_task_set" => {
                let task_id = get_string(args, "task_id", "");
                ctx.current_task.set_current_task(task_id).await;
                Some((true, "current task set".to_string()))
            }
            "current_task_get" => {
                let task_id = ctx.current_task.get_current_task().await;
                Some((true, json!({"task_id": task_id}).to_string()))
            }
            "current_task_clear" => {
                ctx.current_task.clear_current_task().await;
                Some((true, "current task cleared".to_string()))
            }
            _ => None,
        }
    }
}
