//! `create_token`, `verify_token`, `check_permission`, `enable_auth`,
//! `disable_auth`, `auth_status`.

use async_trait::async_trait;
use masc_auth::{Capability, Role};
use serde_json::{Value, json};

use crate::args::{get_bool, get_string, get_string_opt};
use crate::context::DispatchContext;
use crate::tool_handler::ToolHandler;

fn parse_role(s: &str) -> Option<Role> {
    match s {
        "reader" => Some(Role::Reader),
        "worker" => Some(Role::Worker),
        "admin" => Some(Role::Admin),
        _ => None,
    }
}

fn parse_capability(s: &str) -> Option<Capability> {
    match s {
        "read_state" => Some(Capability::ReadState),
        "claim_task" => Some(Capability::ClaimTask),
        "lock_file" => Some(Capability::LockFile),
        "broadcast" => Some(Capability::Broadcast),
        "init" => Some(Capability::Init),
        "reset" => Some(Capability::Reset),
        "approve" => Some(Capability::Approve),
        _ => None,
    }
}

/// Handles the `auth` tool group.
pub struct AuthHandler;

#[async_trait]
impl ToolHandler for AuthHandler {
    async fn dispatch(&self, ctx: &DispatchContext, name: &str, args: &Value) -> Option<(bool, String)> {
        match name {
            "create_token" => {
                let agent = get_string(args, "agent", "");
                let Some(role) = parse_role(&get_string(args, "role", "")) else {
                    return Some((false, "invalid role".to_string()));
                };
                Some(match ctx.auth.create_token(&agent, role).await {
                    Ok((raw, credential)) => (true, json!({"token": raw, "credential": credential}).to_string()),
                    Err(e) => (false, e.to_string()),
                })
            }
            "verify_token" => {
                let agent = get_string(args, "agent", "");
                let token = get_string(args, "token", "");
                Some(match ctx.auth.verify_token(&agent, &token).await {
                    Ok(credential) => (true, json!(credential).to_string()),
                    Err(e) => (false, e.to_string()),
                })
            }
            "check_permission" => {
                let agent = get_string(args, "agent", "");
                let token = get_string_opt(args, "token");
                let Some(capability) = parse_capability(&get_string(args, "capability", "")) else {
                    return Some((false, "invalid capability".to_string()));
                };
                Some(match ctx.auth.check_permission(&agent, token.as_deref(), capability).await {
                    Ok(()) => (true, "allowed".to_string()),
                    Err(e) => (false, e.to_string()),
                })
            }
            "enable_auth" => {
                let require_token = get_bool(args, "require_token", false);
                Some(match ctx.auth.enable_auth(require_token).await {
                    Ok(()) => (true, "auth enabled".to_string()),
                    Err(e) => (false, e.to_string()),
                })
            }
            "disable_auth" => Some(match ctx.auth.disable_auth().await {
                Ok(()) => (true, "auth disabled".to_string()),
                Err(e) => (false, e.to_string()),
            }),
            "auth_status" => Some(match ctx.auth.load_config().await {
                Ok(config) => (true, json!(config).to_string()),
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

    #[tokio::test]
    async fn create_then_verify_token() {
        let ctx = test_context();
        let handler = AuthHandler;
        let (ok, body) = handler
            .dispatch(&ctx, "create_token", &json!({"agent": "w1", "role": "worker"}))
            .await
            .unwrap();
        assert!(ok);
        let token = serde_json::from_str::<serde_json::Value>(&body).unwrap()["token"]
            .as_str()
            .unwrap()
            .to_string();
        let (ok, _) = handler
            .dispatch(&ctx, "verify_token", &json!({"agent": "w1", "token": token}))
            .await
            .unwrap();
        assert!(ok);
    }

    #[tokio::test]
    async fn unknown_role_is_rejected() {
        let ctx = test_context();
        let (ok, _) = AuthHandler
            .dispatch(&ctx, "create_token", &json!({"agent": "w1", "role": "overlord"}))
            .await
            .unwrap();
        assert!(!ok);
    }

    #[tokio::test]
    async fn disabled_auth_allows_check_permission() {
        let ctx = test_context();
        let (ok, body) = AuthHandler
            .dispatch(&ctx, "check_permission", &json!({"agent": "anyone", "capability": "approve"}))
            .await
            .unwrap();
        assert!(ok);
        assert_eq!(body, "allowed");
    }
}
