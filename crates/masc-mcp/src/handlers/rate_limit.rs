//! `rate_limit_check` — consults the calling agent's [`RateTracker`]
//! against the room's configured limits.

use async_trait::async_trait;
use masc_ratelimit::Category;
use serde_json::{Value, json};

use crate::args::get_string;
use crate::context::DispatchContext;
use crate::tool_handler::ToolHandler;

fn parse_category(s: &str) -> Option<Category> {
    match s {
        "general" => Some(Category::General),
        "broadcast" => Some(Category::Broadcast),
        "task_ops" => Some(Category::TaskOps),
        _ => None,
    }
}

/// Handles the `rate_limit` tool group.
pub struct RateLimitHandler;

#[async_trait]
impl ToolHandler for RateLimitHandler {
    async fn dispatch(&self, ctx: &DispatchContext, name: &str, args: &Value) -> Option<(bool, String)> {
        if name != "rate_limit_check" {
            return None;
        }
        let agent = get_string(args, "agent", "");
        let Some(category) = parse_category(&get_string(args, "category", "general")) else {
            return Some((false, "invalid category".to_string()));
        };
        let Some(tracker) = ctx.sessions.rate_tracker(&agent).await else {
            return Some((false, format!("no session for agent {agent}")));
        };
        let now = ctx.clock.now_secs();
        Some(match tracker.check_and_record(category, now, &ctx.rate_config) {
            Ok(()) => (true, "allowed".to_string()),
            Err(e) => (false, json!({"error": e.to_string()}).to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::test_support::test_context;

    #[tokio::test]
    async fn denies_without_a_session() {
        let ctx = test_context();
        let (ok, _) = RateLimitHandler
            .dispatch(&ctx, "rate_limit_check", &json!({"agent": "claude"}))
            .await
            .unwrap();
        assert!(!ok);
    }

    #[tokio::test]
    async fn allows_once_registered() {
        let ctx = test_context();
        ctx.sessions.register("claude", 0).await;
        let (ok, _) = RateLimitHandler
            .dispatch(&ctx, "rate_limit_check", &json!({"agent": "claude"}))
            .await
            .unwrap();
        assert!(ok);
    }
}
