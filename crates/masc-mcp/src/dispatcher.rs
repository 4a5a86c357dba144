//! Top-level JSON-RPC 2.0 method routing: `initialize`, `tools/list`, and
//! `tools/call`, wired to the ordered tool-handler chain.

use std::path::PathBuf;

use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::context::DispatchContext;
use crate::error::{McpError, McpResult};
use crate::handlers::{default_chain, default_chain_with_base_path};
use crate::initialize::{build_initialize_result, protocol_version_from_params, validate_initialize_params};
use crate::jsonrpc::{JsonRpcRequest, make_error, make_response};
use crate::tool_handler::ToolHandler;

/// The tool names this server advertises from `tools/list`, in chain
/// order. Stub namespaces (`cost`, `walph`, `cache`, `worktree`, `swarm`)
/// advertise their single acknowledgement tool alongside the rest.
const TOOL_NAMES: &[&str] = &[
    "register_agent",
    "get_agent",
    "remove_agent",
    "heartbeat",
    "list_agents",
    "acquire_lock",
    "release_lock",
    "get_lock",
    "list_locks",
    "audit_log",
    "audit_get",
    "audit_list",
    "audit_verify_chain",
    "rate_limit_check",
    "cost_record",
    "cost_report",
    "walph_set",
    "walph_get",
    "walph_list",
    "walph_status",
    "create_task",
    "get_task",
    "list_tasks",
    "claim_task",
    "complete_task",
    "cancel_task",
    "broadcast",
    "get_message",
    "list_messages",
    "read_state",
    "room_status",
    "health_check",
    "pause",
    "resume",
    "get_pause",
    "create_token",
    "verify_token",
    "check_permission",
    "enable_auth",
    "disable_auth",
    "auth_status",
    "cache_set",
    "cache_get",
    "cache_stats",
    "worktree_create",
    "worktree_list",
    "worktree_remove",
    "worktree_status",
    "swarm_status",
    "session",
    "init_plan",
    "load_plan",
    "update_plan",
    "add_note",
    "set_deliverable",
    "add_error",
    "resolve_error",
    "get_plan_markdown",
    "current_task_set",
    "current_task_get",
    "current_task_clear",
    "create_handover",
    "load_handover",
    "list_handovers",
    "get_pending_handovers",
    "claim_handover",
    "format_handover",
    "build_successor_prompt",
];

/// Tries `name` against the ordered tool-handler chain, held in the
/// contractual namespace order (see [`crate::handlers::default_chain`]).
pub struct Dispatcher {
    chain: Vec<Box<dyn ToolHandler>>,
}

impl Dispatcher {
    /// Builds a dispatcher over the default handler chain.
    #[must_use]
    pub fn new() -> Self {
        Self { chain: default_chain() }
    }

    /// Builds a dispatcher whose `worktree` handler is rooted at
    /// `worktree_base_path` instead of the system temp directory.
    #[must_use]
    pub fn with_worktree_base_path(worktree_base_path: PathBuf) -> Self {
        Self {
            chain: default_chain_with_base_path(worktree_base_path),
        }
    }

    /// Dispatches `name` against the chain, in order, returning the first
    /// handler's result.
    ///
    /// # Errors
    ///
    /// [`McpError::UnknownTool`] if no handler in the chain recognizes
    /// `name`.
    pub async fn call_tool(&self, ctx: &DispatchContext, name: &str, args: &Value) -> McpResult<(bool, String)> {
        for handler in &self.chain {
            if let Some(result) = handler.dispatch(ctx, name, args).await {
                return Ok(result);
            }
        }
        Err(McpError::UnknownTool(name.to_string()))
    }

    /// Handles one parsed JSON-RPC request or notification against `ctx`.
    ///
    /// Returns `None` for notifications (no `id`): per the JSON-RPC 2.0
    /// spec they never get a reply, even on internal failure.
    pub async fn handle_request(&self, ctx: &DispatchContext, request: JsonRpcRequest) -> Option<Value> {
        let id = request.id.clone();
        let result = self.dispatch_method(ctx, &request).await;
        let id = id?;
        Some(match result {
            Ok(value) => make_response(id, value),
            Err(e) => make_error(id, e.code(), e.to_string(), None),
        })
    }

    async fn dispatch_method(&self, ctx: &DispatchContext, request: &JsonRpcRequest) -> McpResult<Value> {
        match request.method.as_str() {
            "initialize" => {
                validate_initialize_params(request.params.as_ref())?;
                let version = protocol_version_from_params(request.params.as_ref());
                Ok(build_initialize_result(&version))
            }
            "tools/list" => Ok(json!({
                "tools": TOOL_NAMES.iter().map(|name| json!({"name": name})).collect::<Vec<_>>(),
            })),
            "tools/call" => {
                let params = request
                    .params
                    .as_ref()
                    .ok_or_else(|| McpError::InvalidParams("tools/call requires params".to_string()))?;
                let name = params
                    .get("name")
                    .and_then(Value::as_str)
                    .ok_or_else(|| McpError::InvalidParams("tools/call requires params.name".to_string()))?;
                let empty = json!({});
                let arguments = params.get("arguments").unwrap_or(&empty);
                debug!(tool = name, "dispatching tool call");
                let (success, text) = self.call_tool(ctx, name, arguments).await?;
                Ok(json!({"success": success, "text": text}))
            }
            other => {
                warn!(method = other, "method not recognized");
                Err(McpError::MethodNotFound(other.to_string()))
            }
        }
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::test_support::test_context;
    use serde_json::json;

    fn request(method: &str, id: Option<Value>, params: Option<Value>) -> JsonRpcRequest {
        JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            id,
            method: method.to_string(),
            params,
        }
    }

    #[tokio::test]
    async fn initialize_returns_server_info() {
        let ctx = test_context();
        let dispatcher = Dispatcher::new();
        let response = dispatcher
            .handle_request(
                &ctx,
                request("initialize", Some(json!(1)), Some(json!({"protocolVersion": "2025-11-25"}))),
            )
            .await
            .unwrap();
        assert_eq!(response["result"]["serverInfo"]["name"], "masc-mcp");
    }

    #[tokio::test]
    async fn notifications_get_no_reply() {
        let ctx = test_context();
        let dispatcher = Dispatcher::new();
        let response = dispatcher.handle_request(&ctx, request("tools/list", None, None)).await;
        assert!(response.is_none());
    }

    #[tokio::test]
    async fn tools_call_dispatches_through_the_chain() {
        let ctx = test_context();
        let dispatcher = Dispatcher::new();
        let response = dispatcher
            .handle_request(
                &ctx,
                request(
                    "tools/call",
                    Some(json!(1)),
                    Some(json!({"name": "register_agent", "arguments": {"name": "claude"}})),
                ),
            )
            .await
            .unwrap();
        assert_eq!(response["result"]["success"], true);
    }

    #[tokio::test]
    async fn unknown_tool_surfaces_as_invalid_params_code() {
        let ctx = test_context();
        let dispatcher = Dispatcher::new();
        let response = dispatcher
            .handle_request(
                &ctx,
                request("tools/call", Some(json!(1)), Some(json!({"name": "nonexistent_tool"}))),
            )
            .await
            .unwrap();
        assert_eq!(response["error"]["code"], crate::jsonrpc::INVALID_PARAMS);
    }

    #[tokio::test]
    async fn unknown_method_is_method_not_found() {
        let ctx = test_context();
        let dispatcher = Dispatcher::new();
        let response = dispatcher
            .handle_request(&ctx, request("bogus/method", Some(json!(1)), None))
            .await
            .unwrap();
        assert_eq!(response["error"]["code"], crate::jsonrpc::METHOD_NOT_FOUND);
    }
}
