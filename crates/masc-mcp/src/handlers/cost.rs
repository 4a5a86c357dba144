//! `cost` tool group.
//!
//! A process-wide per-agent token/operation ledger. Token pricing itself
//! lives in `masc-config`'s model section, orthogonal to a room; this
//! handler only accumulates caller-reported usage and reports it back,
//! narrow enough to avoid inventing a pricing engine no component in the
//! workspace asked for.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::args::{get_int_opt, get_string, get_string_opt};
use crate::context::DispatchContext;
use crate::tool_handler::ToolHandler;

#[derive(Default, Clone, Copy)]
struct AgentUsage {
    input_tokens: u64,
    output_tokens: u64,
    operations: u64,
}

/// Handles the `cost` tool group.
pub struct CostHandler {
    usage: Mutex<HashMap<String, AgentUsage>>,
}

impl CostHandler {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self {
            usage: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for CostHandler {
    fn default() -> Self {
        Self::new()
    }
}

fn usage_json(agent: &str, usage: &AgentUsage) -> Value {
    json!({
        "agent": agent,
        "input_tokens": usage.input_tokens,
        "output_tokens": usage.output_tokens,
        "operations": usage.operations,
    })
}

#[async_trait]
impl ToolHandler for CostHandler {
    async fn dispatch(&self, _ctx: &DispatchContext, name: &str, args: &Value) -> Option<(bool, String)> {
        match name {
            "cost_record" => {
                let agent = get_string(args, "agent", "");
                if agent.is_empty() {
                    return Some((false, "agent is required".to_string()));
                }
                let input_tokens = get_int_opt(args, "input_tokens").unwrap_or(0).max(0) as u64;
                let output_tokens = get_int_opt(args, "output_tokens").unwrap_or(0).max(0) as u64;
                let mut usage = self.usage.lock().unwrap_or_else(|e| e.into_inner());
                let entry = usage.entry(agent.clone()).or_default();
                entry.input_tokens += input_tokens;
                entry.output_tokens += output_tokens;
                entry.operations += 1;
                Some((true, format!("recorded usage for {agent}")))
            }
            "cost_report" => {
                let usage = self.usage.lock().unwrap_or_else(|e| e.into_inner());
                let report = match get_string_opt(args, "agent") {
                    Some(agent) => match usage.get(&agent) {
                        Some(entry) => usage_json(&agent, entry),
                        None => usage_json(&agent, &AgentUsage::default()),
                    },
                    None => {
                        let agents: Vec<Value> = usage.iter().map(|(agent, entry)| usage_json(agent, entry)).collect();
                        json!({"agents": agents})
                    }
                };
                Some((true, report.to_string()))
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
    async fn records_and_reports_usage() {
        let ctx = test_context();
        let handler = CostHandler::new();
        handler
            .dispatch(&ctx, "cost_record", &json!({"agent": "claude", "input_tokens": 100, "output_tokens": 50}))
            .await
            .unwrap();
        handler
            .dispatch(&ctx, "cost_record", &json!({"agent": "claude", "input_tokens": 20, "output_tokens": 10}))
            .await
            .unwrap();
        let (ok, text) = handler.dispatch(&ctx, "cost_report", &json!({"agent": "claude"})).await.unwrap();
        assert!(ok);
        let report: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(report["input_tokens"], 120);
        assert_eq!(report["output_tokens"], 60);
        assert_eq!(report["operations"], 2);
    }

    #[tokio::test]
    async fn record_requires_agent() {
        let ctx = test_context();
        let handler = CostHandler::new();
        let (ok, _) = handler.dispatch(&ctx, "cost_record", &json!({})).await.unwrap();
        assert!(!ok);
    }

    #[tokio::test]
    async fn falls_through_on_unknown_tool() {
        let ctx = test_context();
        assert!(CostHandler::new().dispatch(&ctx, "nope", &json!({})).await.is_none());
    }
}
