//! `broadcast`, `get_message`, `list_messages`, `read_state`,
//! `room_status`, `health_check`.

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::args::{get_int_opt, get_string};
use crate::context::DispatchContext;
use crate::tool_handler::ToolHandler;

const DEFAULT_LIST_LIMIT: usize = 50;

/// Handles the `room` tool group.
pub struct RoomHandler;

#[async_trait]
impl ToolHandler for RoomHandler {
    async fn dispatch(&self, ctx: &DispatchContext, name: &str, args: &Value) -> Option<(bool, String)> {
        match name {
            "broadcast" => {
                let from_agent = get_string(args, "from_agent", "");
                let content = get_string(args, "content", "");
                Some(match ctx.room.broadcast(&from_agent, &content).await {
                    Ok(message) => (true, json!(message).to_string()),
                    Err(e) => (false, e.to_string()),
                })
            }
            "get_message" => {
                let seq = get_int_opt(args, "seq").unwrap_or(0).max(0) as u64;
                Some(match ctx.room.get_message(seq).await {
                    Ok(message) => (true, json!(message).to_string()),
                    Err(e) => (false, e.to_string()),
                })
            }
            "list_messages" => {
                let since_seq = get_int_opt(args, "since_seq").unwrap_or(0).max(0) as u64;
                let limit = get_int_opt(args, "limit").unwrap_or(DEFAULT_LIST_LIMIT as i64).max(0) as usize;
                Some(match ctx.room.list_messages(since_seq, limit).await {
                    Ok(messages) => (true, json!(messages).to_string()),
                    Err(e) => (false, e.to_string()),
                })
            }
            "read_state" => Some(match ctx.room.read_state().await {
                Ok(state) => (true, json!(state).to_string()),
                Err(e) => (false, e.to_string()),
            }),
            "room_status" => Some(match ctx.room.status().await {
                Ok(status) => (true, status.to_string()),
                Err(e) => (false, e.to_string()),
            }),
            "health_check" => Some(match ctx.room.health_check().await {
                Ok(health) => (
                    health.is_healthy,
                    json!({"is_healthy": health.is_healthy, "detail": health.detail}).to_string(),
                ),
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
    async fn broadcast_then_list_messages() {
        let ctx = test_context();
        let handler = RoomHandler;
        let (ok, body) = handler
            .dispatch(&ctx, "broadcast", &json!({"from_agent": "claude", "content": "@gemini hi"}))
            .await
            .unwrap();
        assert!(ok);
        assert!(body.contains("\"mention\":\"gemini\""));
        let (ok, _) = handler.dispatch(&ctx, "list_messages", &json!({})).await.unwrap();
        assert!(ok);
    }

    #[tokio::test]
    async fn health_check_reflects_backend() {
        let ctx = test_context();
        let (ok, _) = RoomHandler.dispatch(&ctx, "health_check", &json!({})).await.unwrap();
        assert!(ok);
    }
}
