//! `audit_log`, `audit_get`, `audit_list`, `audit_verify_chain`.

use async_trait::async_trait;
use serde_json::Value;

use crate::args::{get_bool, get_int_opt, get_string, get_string_opt};
use crate::audit_shapes::audit_event;
use crate::context::DispatchContext;
use crate::tool_handler::ToolHandler;

const DEFAULT_LIST_LIMIT: usize = 50;

/// Handles the `audit` tool group.
pub struct AuditHandler;

#[async_trait]
impl ToolHandler for AuditHandler {
    async fn dispatch(&self, ctx: &DispatchContext, name: &str, args: &Value) -> Option<(bool, String)> {
        match name {
            "audit_log" => {
                let agent = get_string(args, "agent", "");
                let event_type = get_string(args, "event_type", "");
                let success = get_bool(args, "success", true);
                let detail = get_string_opt(args, "detail");
                Some(match ctx.audit.append(&agent, &event_type, success, detail).await {
                    Ok(entry) => (true, audit_event(&entry).to_string()),
                    Err(e) => (false, e.to_string()),
                })
            }
            "audit_get" => {
                let seq = get_int_opt(args, "seq").unwrap_or(0).max(0) as u64;
                Some(match ctx.audit.get(seq).await {
                    Ok(entry) => (true, audit_event(&entry).to_string()),
                    Err(e) => (false, e.to_string()),
                })
            }
            "audit_list" => {
                let since_seq = get_int_opt(args, "since_seq").unwrap_or(0).max(0) as u64;
                let limit = get_int_opt(args, "limit").unwrap_or(DEFAULT_LIST_LIMIT as i64).max(0) as usize;
                Some(match ctx.audit.list(since_seq, limit).await {
                    Ok(entries) => {
                        let events: Vec<_> = entries.iter().map(audit_event).collect();
                        (true, serde_json::json!(events).to_string())
                    }
                    Err(e) => (false, e.to_string()),
                })
            }
            "audit_verify_chain" => Some(match ctx.audit.verify_chain().await {
                Ok(valid) => (valid, serde_json::json!({"valid": valid}).to_string()),
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
    use serde_json::json;

    #[tokio::test]
    async fn log_then_verify_chain() {
        let ctx = test_context();
        let handler = AuditHandler;
        handler
            .dispatch(&ctx, "audit_log", &json!({"agent": "claude", "event_type": "token_created"}))
            .await
            .unwrap();
        let (ok, body) = handler.dispatch(&ctx, "audit_verify_chain", &json!({})).await.unwrap();
        assert!(ok);
        assert!(body.contains("\"valid\":true"));
    }

    #[tokio::test]
    async fn list_returns_fixed_event_shape() {
        let ctx = test_context();
        let handler = AuditHandler;
        handler
            .dispatch(&ctx, "audit_log", &json!({"agent": "claude", "event_type": "x"}))
            .await
            .unwrap();
        let (ok, body) = handler.dispatch(&ctx, "audit_list", &json!({})).await.unwrap();
        assert!(ok);
        assert!(body.contains("\"event_type\":\"x\""));
        assert!(!body.contains("\"prev_hash\""));
    }
}
