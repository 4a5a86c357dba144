//! `create_handover`, `load_handover`, `list_handovers`,
//! `get_pending_handovers`, `claim_handover`, `format_handover`,
//! `build_successor_prompt`.

use async_trait::async_trait;
use masc_handover::{HandoverDetails, TriggerReason, build_successor_prompt, format_as_markdown};
use serde_json::{Value, json};

use crate::args::{get_float, get_int_opt, get_string, get_string_list, get_string_opt};
use crate::context::DispatchContext;
use crate::tool_handler::ToolHandler;

fn parse_reason(args: &Value) -> Option<TriggerReason> {
    match get_string(args, "reason_type", "").as_str() {
        "context_limit" => Some(TriggerReason::ContextLimit(get_float(args, "context_usage_percent", 0.0) as u32)),
        "timeout" => Some(TriggerReason::Timeout(get_int_opt(args, "timeout_seconds").unwrap_or(0).max(0) as u64)),
        "explicit" => Some(TriggerReason::Explicit),
        "fatal_error" => Some(TriggerReason::FatalError(get_string(args, "error_message", ""))),
        "task_complete" => Some(TriggerReason::TaskComplete),
        _ => None,
    }
}

fn parse_details(args: &Value) -> HandoverDetails {
    HandoverDetails {
        current_goal: get_string(args, "current_goal", ""),
        progress_summary: get_string(args, "progress_summary", ""),
        completed_steps: get_string_list(args, "completed_steps"),
        pending_steps: get_string_list(args, "pending_steps"),
        key_decisions: get_string_list(args, "key_decisions"),
        assumptions: get_string_list(args, "assumptions"),
        warnings: get_string_list(args, "warnings"),
        unresolved_errors: get_string_list(args, "unresolved_errors"),
        modified_files: get_string_list(args, "modified_files"),
        context_usage_percent: get_float(args, "context_usage_percent", 0.0) as u32,
    }
}

/// Handles the `handover` tool group.
pub struct HandoverHandler;

#[async_trait]
impl ToolHandler for HandoverHandler {
    async fn dispatch(&self, ctx: &DispatchContext, name: &str, args: &Value) -> Option<(bool, String)> {
        match name {
            "create_handover" => {
                let from_agent = get_string(args, "from_agent", "");
                let task_id = get_string(args, "task_id", "");
                let session_id = get_string(args, "session_id", "");
                let Some(reason) = parse_reason(args) else {
                    return Some((false, "invalid reason_type".to_string()));
                };
                let details = parse_details(args);
                Some(
                    match ctx
                        .handovers
                        .create_handover(from_agent, task_id, session_id, &reason, details)
                        .await
                    {
                        Ok(record) => (true, json!(record).to_string()),
                        Err(e) => (false, e.to_string()),
                    },
                )
            }
            "load_handover" => {
                let id = get_string(args, "id", "");
                Some(match ctx.handovers.load_handover(&id).await {
                    Ok(record) => (true, json!(record).to_string()),
                    Err(e) => (false, e.to_string()),
                })
            }
            "list_handovers" => Some(match ctx.handovers.list_handovers().await {
                Ok(records) => (true, json!(records).to_string()),
                Err(e) => (false, e.to_string()),
            }),
            "get_pending_handovers" => Some(match ctx.handovers.get_pending_handovers().await {
                Ok(records) => (true, json!(records).to_string()),
                Err(e) => (false, e.to_string()),
            }),
            "claim_handover" => {
                let id = get_string(args, "id", "");
                let agent_name = get_string(args, "agent_name", "");
                Some(match ctx.handovers.claim_handover(&id, &agent_name).await {
                    Ok(record) => (true, json!(record).to_string()),
                    Err(e) => (false, e.to_string()),
                })
            }
            "format_handover" => {
                let id = get_string(args, "id", "");
                Some(match ctx.handovers.load_handover(&id).await {
                    Ok(record) => (true, format_as_markdown(&record)),
                    Err(e) => (false, e.to_string()),
                })
            }
            "build_successor_prompt" => {
                let id = get_string(args, "id", "");
                let additional = get_string_opt(args, "additional_instructions");
                Some(match ctx.handovers.load_handover(&id).await {
                    Ok(record) => (true, build_successor_prompt(&record, additional.as_deref())),
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
    use serde_json::json;

    #[tokio::test]
    async fn create_then_claim_then_format() {
        let ctx = test_context();
        let handler = HandoverHandler;
        let (ok, body) = handler
            .dispatch(
                &ctx,
                "create_handover",
                &json!({
                    "from_agent": "claude",
                    "task_id": "t1",
                    "session_id": "s1",
                    "reason_type": "context_limit",
                    "context_usage_percent": 92,
                    "current_goal": "fix the parser",
                }),
            )
            .await
            .unwrap();
        assert!(ok);
        let id = serde_json::from_str::<serde_json::Value>(&body).unwrap()["id"]
            .as_str()
            .unwrap()
            .to_string();

        let (ok, body) = handler
            .dispatch(&ctx, "claim_handover", &json!({"id": id, "agent_name": "gemini"}))
            .await
            .unwrap();
        assert!(ok);
        assert!(body.contains("\"to_agent\":\"gemini\""));

        let (ok, body) = handler.dispatch(&ctx, "format_handover", &json!({"id": id})).await.unwrap();
        assert!(ok);
        assert!(body.contains("fix the parser"));
    }

    #[tokio::test]
    async fn invalid_reason_type_is_rejected() {
        let ctx = test_context();
        let (ok, _) = HandoverHandler
            .dispatch(
                &ctx,
                "create_handover",
                &json!({"from_agent": "claude", "task_id": "t1", "session_id": "s1", "reason_type": "nonsense"}),
            )
            .await
            .unwrap();
        assert!(!ok);
    }

    #[tokio::test]
    async fn pending_lists_unclaimed_only() {
        let ctx = test_context();
        let handler = HandoverHandler;
        handler
            .dispatch(
                &ctx,
                "create_handover",
                &json!({"from_agent": "claude", "task_id": "t1", "session_id": "s1", "reason_type": "explicit"}),
            )
            .await
            .unwrap();
        let (ok, body) = handler.dispatch(&ctx, "get_pending_handovers", &json!({})).await.unwrap();
        assert!(ok);
        assert!(body.contains("\"task_id\":\"t1\""));
    }
}
