//! `session` tool group, thin-wrapping
//! [`masc_session::handle_mcp_session_tool`].

use async_trait::async_trait;
use masc_session::handle_mcp_session_tool;
use serde_json::Value;

use crate::args::get_string;
use crate::context::DispatchContext;
use crate::tool_handler::ToolHandler;

/// Handles the `session` tool group.
pub struct SessionHandler;

#[async_trait]
impl ToolHandler for SessionHandler {
    async fn dispatch(&self, ctx: &DispatchContext, name: &str, args: &Value) -> Option<(bool, String)> {
        if name != "session" {
            return None;
        }
        let action = get_string(args, "action", "");
        let now = ctx.clock.now_secs();
        Some(match handle_mcp_session_tool(&ctx.mcp_sessions, &action, args, now).await {
            Ok(result) => (true, result.to_string()),
            Err(e) => (false, e.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::test_support::test_context;
    use serde_json::json;

    #[tokio::test]
    async fn create_then_list() {
        let ctx = test_context();
        let handler = SessionHandler;
        let (ok, body) = handler
            .dispatch(&ctx, "session", &json!({"action": "create", "agent_name": "claude"}))
            .await
            .unwrap();
        assert!(ok);
        assert!(body.contains("\"agent_name\":\"claude\""));
        let (ok, _) = handler.dispatch(&ctx, "session", &json!({"action": "list"})).await.unwrap();
        assert!(ok);
    }

    #[tokio::test]
    async fn unknown_action_fails() {
        let ctx = test_context();
        let (ok, _) = SessionHandler
            .dispatch(&ctx, "session", &json!({"action": "bogus"}))
            .await
            .unwrap();
        assert!(!ok);
    }
}
