//! `pause`, `resume`, `get_pause` — the room-wide soft-stop flag.

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::args::{get_string, get_string_opt};
use crate::context::DispatchContext;
use crate::tool_handler::ToolHandler;

/// Handles the `control` tool group.
pub struct ControlHandler;

#[async_trait]
impl ToolHandler for ControlHandler {
    async fn dispatch(&self, ctx: &DispatchContext, name: &str, args: &Value) -> Option<(bool, String)> {
        match name {
            "pause" => {
                let actor = get_string(args, "actor", "");
                let reason = get_string_opt(args, "reason");
                Some(match ctx.room.pause(&actor, reason).await {
                    Ok(pause) => (true, json!(pause).to_string()),
                    Err(e) => (false, e.to_string()),
                })
            }
            "resume" => {
                let actor = get_string(args, "actor", "");
                Some(match ctx.room.resume(&actor).await {
                    Ok(pause) => (true, json!(pause).to_string()),
                    Err(e) => (false, e.to_string()),
                })
            }
            "get_pause" => Some(match ctx.room.get_pause().await {
                Ok(pause) => (true, json!(pause).to_string()),
                Err(e) => (false, e.to_string()),
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::test_support::test_context;

    #[tokio::test]
    async fn pause_then_resume() {
        let ctx = test_context();
        let handler = ControlHandler;
        let (ok, body) = handler.dispatch(&ctx, "pause", &json!({"actor": "claude"})).await.unwrap();
        assert!(ok);
        assert!(body.contains("\"paused\":true"));
        let (ok, body) = handler.dispatch(&ctx, "resume", &json!({"actor": "claude"})).await.unwrap();
        assert!(ok);
        assert!(body.contains("\"paused\":false"));
    }
}
