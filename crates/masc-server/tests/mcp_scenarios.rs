//! End-to-end JSON-RPC scenarios, driven through a real [`Dispatcher`] over
//! a [`DispatchContext`] built the same way `main.rs` builds one.

use masc_mcp::{Dispatcher, JsonRpcRequest};
use masc_server::context::{apply_auth_config, build_dispatch_context};
use serde_json::{Value, json};

fn fresh_context() -> (masc_mcp::DispatchContext, Dispatcher) {
    (build_dispatch_context(&masc_config::Config::default()), Dispatcher::new())
}

fn request(method: &str, id: i64, params: Value) -> JsonRpcRequest {
    JsonRpcRequest {
        jsonrpc: "2.0".to_string(),
        id: Some(json!(id)),
        method: method.to_string(),
        params: Some(params),
    }
}

async fn call_tool(dispatcher: &Dispatcher, ctx: &masc_mcp::DispatchContext, name: &str, args: Value) -> Value {
    let response = dispatcher
        .handle_request(ctx, request("tools/call", 1, json!({"name": name, "arguments": args})))
        .await
        .expect("tools/call always replies");
    response["result"]["text"]
        .as_str()
        .map(|text| serde_json::from_str(text).unwrap_or(Value::String(text.to_string())))
        .unwrap_or(Value::Null)
}

#[tokio::test]
async fn s1_initialize_handshake() {
    let (ctx, dispatcher) = fresh_context();
    let response = dispatcher
        .handle_request(
            &ctx,
            request(
                "initialize",
                1,
                json!({"protocolVersion": "2025-11-25", "capabilities": {}, "clientInfo": {"name": "t", "version": "1.0"}}),
            ),
        )
        .await
        .unwrap();
    assert_eq!(response["id"], 1);
    assert!(response["result"]["serverInfo"].is_object());
    assert!(response["result"]["capabilities"].is_object());
}

#[tokio::test]
async fn s2_message_and_mention_sequence() {
    let (ctx, dispatcher) = fresh_context();
    call_tool(&dispatcher, &ctx, "register_agent", json!({"name": "claude"})).await;
    call_tool(&dispatcher, &ctx, "register_agent", json!({"name": "gemini-swift-tiger"})).await;

    let first = call_tool(
        &dispatcher,
        &ctx,
        "broadcast",
        json!({"from_agent": "claude", "content": "@gemini please review"}),
    )
    .await;
    assert_eq!(first["seq"], 1);
    assert_eq!(first["mention"], "gemini");

    let second = call_tool(&dispatcher, &ctx, "broadcast", json!({"from_agent": "claude", "content": "ping"})).await;
    assert_eq!(second["seq"], 2);
}

#[tokio::test]
async fn s3_task_lifecycle() {
    let (ctx, dispatcher) = fresh_context();
    call_tool(&dispatcher, &ctx, "register_agent", json!({"name": "claude"})).await;
    call_tool(&dispatcher, &ctx, "register_agent", json!({"name": "gemini"})).await;

    let task = call_tool(&dispatcher, &ctx, "create_task", json!({"title": "Fix bug"})).await;
    let id = task["id"].as_str().unwrap().to_string();

    let claimed = dispatcher
        .call_tool(&ctx, "claim_task", &json!({"id": id, "agent": "claude"}))
        .await
        .unwrap();
    assert!(claimed.0);

    let (second_claim_ok, _) = dispatcher
        .call_tool(&ctx, "claim_task", &json!({"id": id, "agent": "gemini"}))
        .await
        .unwrap();
    assert!(!second_claim_ok);

    let (completed_ok, _) = dispatcher
        .call_tool(&ctx, "complete_task", &json!({"id": id, "agent": "claude"}))
        .await
        .unwrap();
    assert!(completed_ok);

    let (claim_after_complete_ok, _) = dispatcher
        .call_tool(&ctx, "claim_task", &json!({"id": id, "agent": "gemini"}))
        .await
        .unwrap();
    assert!(!claim_after_complete_ok);
}

#[tokio::test]
async fn s4_auth_role_matrix() {
    let (ctx, dispatcher) = fresh_context();
    let mut config = masc_config::Config::default();
    config.masc.auth.enabled = true;
    config.masc.auth.require_token = true;
    apply_auth_config(&ctx, &config).await.unwrap();

    let reader_token = call_tool(&dispatcher, &ctx, "create_token", json!({"agent": "reader", "role": "reader"})).await;
    let reader_token = reader_token["token"].as_str().unwrap();
    let worker_token = call_tool(&dispatcher, &ctx, "create_token", json!({"agent": "worker", "role": "worker"})).await;
    let worker_token = worker_token["token"].as_str().unwrap();

    let (reader_ok, reader_text) = dispatcher
        .call_tool(
            &ctx,
            "check_permission",
            &json!({"agent": "reader", "token": reader_token, "capability": "claim_task"}),
        )
        .await
        .unwrap();
    assert!(!reader_ok, "reader lacks claim_task: {reader_text}");

    let (worker_ok, _) = dispatcher
        .call_tool(
            &ctx,
            "check_permission",
            &json!({"agent": "worker", "token": worker_token, "capability": "claim_task"}),
        )
        .await
        .unwrap();
    assert!(worker_ok);

    let (no_token_ok, no_token_text) = dispatcher
        .call_tool(&ctx, "check_permission", &json!({"agent": "worker", "capability": "claim_task"}))
        .await
        .unwrap();
    assert!(!no_token_ok);
    assert!(no_token_text.contains("unauthorized"));
}

#[tokio::test]
async fn s6_handover_pending_and_single_claim() {
    let (ctx, dispatcher) = fresh_context();
    let record = call_tool(
        &dispatcher,
        &ctx,
        "create_handover",
        json!({"from_agent": "claude", "task_id": "t", "session_id": "s", "reason_type": "explicit"}),
    )
    .await;
    assert_eq!(record["handover_reason"], "explicit");
    assert!(record["to_agent"].is_null());
    let id = record["id"].as_str().unwrap().to_string();

    let pending = call_tool(&dispatcher, &ctx, "get_pending_handovers", json!({})).await;
    assert_eq!(pending.as_array().unwrap().len(), 1);

    let (first_claim_ok, _) = dispatcher
        .call_tool(&ctx, "claim_handover", &json!({"id": id, "agent": "gemini"}))
        .await
        .unwrap();
    assert!(first_claim_ok);

    let (second_claim_ok, _) = dispatcher
        .call_tool(&ctx, "claim_handover", &json!({"id": id, "agent": "claude"}))
        .await
        .unwrap();
    assert!(!second_claim_ok);
}
