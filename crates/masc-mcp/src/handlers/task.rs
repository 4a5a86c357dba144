//! `create_task`, `get_task`, `list_tasks`, `claim_task`, `complete_task`,
//! `cancel_task`.

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::args::{get_int_opt, get_string, get_string_list, get_string_opt};
use crate::context::DispatchContext;
use crate::tool_handler::ToolHandler;

/// Handles the `task` tool group.
pub struct TaskHandler;

#[async_trait]
impl ToolHandler for TaskHandler {
    async fn dispatch(&self, ctx: &DispatchContext, name: &str, args: &Value) -> Option<(bool, String)> {
        match name {
            "create_task" => {
                let title = get_string(args, "title", "");
                let description = get_string(args, "description", "");
                let priority = get_int_opt(args, "priority").unwrap_or(0);
                let files = get_string_list(args, "files");
                let worktree = get_string_opt(args, "worktree");
                Some(match ctx.room.create_task(title, description, priority, files, worktree).await {
                    Ok(task) => (true, json!(task).to_string()),
                    Err(e) => (false, e.to_string()),
                })
            }
            "get_task" => {
                let id = get_string(args, "id", "");
                Some(match ctx.room.get_task(&id).await {
                    Ok(task) => (true, json!(task).to_string()),
                    Err(e) => (false, e.to_string()),
                })
            }
            "list_tasks" => Some(match ctx.room.list_tasks().await {
                Ok(tasks) => (true, json!(tasks).to_string()),
                Err(e) => (false, e.to_string()),
            }),
            "claim_task" => {
                let id = get_string(args, "id", "");
                let agent = get_string(args, "agent", "");
                Some(match ctx.room.claim_task(&id, &agent).await {
                    Ok(task) => (true, json!(task).to_string()),
                    Err(e) => (false, e.to_string()),
                })
            }
            "complete_task" => {
                let id = get_string(args, "id", "");
                let agent = get_string(args, "agent", "");
                Some(match ctx.room.complete_task(&id, &agent).await {
                    Ok(task) => (true, json!(task).to_string()),
                    Err(e) => (false, e.to_string()),
                })
            }
            "cancel_task" => {
                let id = get_string(args, "id", "");
                let reason = get_string(args, "reason", "");
                Some(match ctx.room.cancel_task(&id, reason).await {
                    Ok(task) => (true, json!(task).to_string()),
                    Err(e) => (false, e.to_string()),
                })
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::test_support::test_context;

    #[tokio::test]
    async fn full_lifecycle_through_the_handler() {
        let ctx = test_context();
        ctx.room.register_agent("claude", Default::default()).await.unwrap();
        let handler = TaskHandler;
        let (ok, body) = handler
            .dispatch(&ctx, "create_task", &json!({"title": "Fix bug", "description": "d"}))
            .await
            .unwrap();
        assert!(ok);
        let id = serde_json::from_str::<serde_json::Value>(&body).unwrap()["id"]
            .as_str()
            .unwrap()
            .to_string();
        let (ok, _) = handler.dispatch(&ctx, "claim_task", &json!({"id": id, "agent": "claude"})).await.unwrap();
        assert!(ok);
        let (ok, _) = handler.dispatch(&ctx, "complete_task", &json!({"id": id, "agent": "claude"})).await.unwrap();
        assert!(ok);
    }

    #[tokio::test]
    async fn claim_by_unregistered_agent_fails() {
        let ctx = test_context();
        let handler = TaskHandler;
        let (_, body) = handler.dispatch(&ctx, "create_task", &json!({"title": "t"})).await.unwrap();
        let id = serde_json::from_str::<serde_json::Value>(&body).unwrap()["id"]
            .as_str()
            .unwrap()
            .to_string();
        let (ok, _) = handler.dispatch(&ctx, "claim_task", &json!({"id": id, "agent": "ghost"})).await.unwrap();
        assert!(!ok);
    }
}
