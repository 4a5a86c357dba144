//! `register_agent`, `get_agent`, `remove_agent`, `heartbeat`,
//! `list_agents`.

use std::collections::BTreeSet;

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::args::{get_string, get_string_list};
use crate::context::DispatchContext;
use crate::tool_handler::ToolHandler;

/// Handles the `agent` tool group.
pub struct AgentHandler;

#[async_trait]
impl ToolHandler for AgentHandler {
    async fn dispatch(&self, ctx: &DispatchContext, name: &str, args: &Value) -> Option<(bool, String)> {
        match name {
            "register_agent" => {
                let agent_name = get_string(args, "name", "");
                let capabilities: BTreeSet<String> = get_string_list(args, "capabilities").into_iter().collect();
                Some(match ctx.room.register_agent(&agent_name, capabilities).await {
                    Ok(agent) => (true, json!(agent).to_string()),
                    Err(e) => (false, e.to_string()),
                })
            }
            "get_agent" => {
                let agent_name = get_string(args, "name", "");
                Some(match ctx.room.get_agent(&agent_name).await {
                    Ok(agent) => (true, json!(agent).to_string()),
                    Err(e) => (false, e.to_string()),
                })
            }
            "remove_agent" => {
                let agent_name = get_string(args, "name", "");
                Some(match ctx.room.remove_agent(&agent_name).await {
                    Ok(()) => (true, format!("removed {agent_name}")),
                    Err(e) => (false, e.to_string()),
                })
            }
            "heartbeat" => {
                let agent_name = get_string(args, "name", "");
                Some(match ctx.room.heartbeat(&agent_name).await {
                    Ok(agent) => (true, json!(agent).to_string()),
                    Err(e) => (false, e.to_string()),
                })
            }
            "list_agents" => Some(match ctx.room.list_agents().await {
                Ok(agents) => (true, json!(agents).to_string()),
                Err(e) => (false, e.to_string()),
            }),
            _ => None,
        }
    }
}
