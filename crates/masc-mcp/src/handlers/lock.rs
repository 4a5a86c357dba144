//! `acquire_lock`, `release_lock`, `get_lock`, `list_locks`.

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::args::get_string;
use crate::context::DispatchContext;
use crate::tool_handler::ToolHandler;

/// Handles the `lock` tool group.
pub struct LockHandler;

#[async_trait]
impl ToolHandler for LockHandler {
    async fn dispatch(&self, ctx: &DispatchContext, name: &str, args: &Value) -> Option<(bool, String)> {
        match name {
            "acquire_lock" => {
                let resource = get_string(args, "resource", "");
                let owner = get_string(args, "owner", "");
                Some(match ctx.room.acquire_lock(&resource, &owner).await {
                    Ok(Some(lock)) => (true, json!(lock).to_string()),
                    Ok(None) => (false, format!("lock held: {resource}")),
                    Err(e) => (false, e.to_string()),
                })
            }
            "release_lock" => {
                let resource = get_string(args, "resource", "");
                let owner = get_string(args, "owner", "");
                Some(match ctx.room.release_lock(&resource, &owner).await {
                    Ok(()) => (true, format!("released {resource}")),
                    Err(e) => (false, e.to_string()),
                })
            }
            "get_lock" => {
                let resource = get_string(args, "resource", "");
                Some(match ctx.room.get_lock(&resource).await {
                    Ok(lock) => (true, json!(lock).to_string()),
                    Err(e) => (false, e.to_string()),
                })
            }
            "list_locks" => Some(match ctx.room.list_locks().await {
                Ok(locks) => (true, json!(locks).to_string()),
                Err(e) => (false, e.to_string()),
            }),
            _ => None,
        }
    }
}
