//! The `{create, list, get, remove, cleanup}` session tool action surface,
//! taking raw JSON args as delivered by the MCP dispatcher's `session`
//! tool group.

use serde_json::Value;

use crate::error::{SessionError, SessionResult};
use crate::mcp_session::McpSessionStore;

fn arg_str<'a>(args: &'a Value, key: &str) -> Option<&'a str> {
    args.get(key).and_then(Value::as_str)
}

/// Dispatches one of the five session tool actions against `store`.
///
/// - `create`: optional `agent_name` string arg; returns the new session.
/// - `list`: no args; returns every stored session.
/// - `get`/`remove`: require a `session_id` string arg.
/// - `cleanup`: optional `max_age_sec` (default 3600); returns the count
///   removed.
///
/// # Errors
///
/// [`SessionError::MissingSessionId`] if `get`/`remove` lack `session_id`;
/// [`SessionError::UnknownAction`] for anything else; [`SessionError::
/// McpSessionNotFound`] if `get`/`remove` name a session that no longer
/// exists.
pub async fn handle_mcp_session_tool(
    store: &McpSessionStore,
    action: &str,
    args: &Value,
    now: u64,
) -> SessionResult<Value> {
    match action {
        "create" => {
            let agent_name = arg_str(args, "agent_name").map(str::to_string);
            let session = store.create(agent_name, now).await;
            Ok(serde_json::to_value(session).unwrap_or(Value::Null))
        }
        "list" => {
            let sessions = store.list_all().await;
            Ok(serde_json::to_value(sessions).unwrap_or(Value::Null))
        }
        "get" => {
            let id = arg_str(args, "session_id").ok_or(SessionError::MissingSessionId)?;
            let session = store.get(id).await?;
            Ok(serde_json::to_value(session).unwrap_or(Value::Null))
        }
        "remove" => {
            let id = arg_str(args, "session_id").ok_or(SessionError::MissingSessionId)?;
            store.get(id).await?;
            store.remove(id).await;
            Ok(serde_json::json!({ "removed": id }))
        }
        "cleanup" => {
            let max_age_sec = args.get("max_age_sec").and_then(Value::as_u64).unwrap_or(3600);
            let removed = store.cleanup(now, max_age_sec).await;
            Ok(serde_json::json!({ "removed_count": removed }))
        }
        other => Err(SessionError::UnknownAction(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_action_returns_session_json() {
        let store = McpSessionStore::new();
        let result = handle_mcp_session_tool(&store, "create", &serde_json::json!({}), 0)
            .await
            .unwrap();
        assert!(result.get("id").is_some());
    }

    #[tokio::test]
    async fn get_without_session_id_is_an_error() {
        let store = McpSessionStore::new();
        assert!(matches!(
            handle_mcp_session_tool(&store, "get", &serde_json::json!({}), 0).await,
            Err(SessionError::MissingSessionId)
        ));
    }

    #[tokio::test]
    async fn unknown_action_is_an_error() {
        let store = McpSessionStore::new();
        assert!(matches!(
            handle_mcp_session_tool(&store, "bogus", &serde_json::json!({}), 0).await,
            Err(SessionError::UnknownAction(_))
        ));
    }

    #[tokio::test]
    async fn remove_then_get_not_found() {
        let store = McpSessionStore::new();
        let created = handle_mcp_session_tool(&store, "create", &serde_json::json!({}), 0)
            .await
            .unwrap();
        let id = created.get("id").unwrap().as_str().unwrap().to_string();
        handle_mcp_session_tool(&store, "remove", &serde_json::json!({"session_id": id}), 0)
            .await
            .unwrap();
        assert!(matches!(
            handle_mcp_session_tool(&store, "get", &serde_json::json!({"session_id": id}), 0).await,
            Err(SessionError::McpSessionNotFound(_))
        ));
    }
}
