//! `swarm` tool group.
//!
//! Swarm/federation simulations are explicitly out of scope (§1); this
//! stub only occupies the namespace's position in the dispatch chain.

use async_trait::async_trait;
use serde_json::Value;

use crate::context::DispatchContext;
use crate::tool_handler::ToolHandler;

/// Handles the `swarm` tool group.
pub struct SwarmHandler;

#[async_trait]
impl ToolHandler for SwarmHandler {
    async fn dispatch(&self, _ctx: &DispatchContext, name: &str, _args: &Value) -> Option<(bool, String)> {
        if name != "swarm_status" {
            return None;
        }
        Some((true, "swarm orchestration is out of scope for this room".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::test_support::test_context;
    use serde_json::json;

    #[tokio::test]
    async fn acknowledges() {
        let ctx = test_context();
        let (ok, _) = SwarmHandler.dispatch(&ctx, "swarm_status", &json!({})).await.unwrap();
        assert!(ok);
    }
}
