//! JSON-RPC 2.0 request/response envelopes, id validation, and the fixed
//! error codes.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Invalid JSON could not be parsed at all.
pub const PARSE_ERROR: i64 = -32700;
/// The parsed value was not a well-formed JSON-RPC 2.0 request.
pub const INVALID_REQUEST: i64 = -32600;
/// `method` named nothing the server understands.
pub const METHOD_NOT_FOUND: i64 = -32601;
/// `params` was missing or shaped wrong for the named method.
pub const INVALID_PARAMS: i64 = -32602;
/// An unexpected failure occurred while handling an otherwise valid
/// request.
pub const INTERNAL_ERROR: i64 = -32603;

/// A parsed JSON-RPC 2.0 request or notification.
///
/// `id` present means a request expecting a reply; `id` absent means a
/// notification, which never gets one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    /// Always `"2.0"` for a conforming request.
    pub jsonrpc: String,
    /// Present for requests, absent for notifications.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    /// The method name, e.g. `"initialize"`, `"tools/call"`.
    pub method: String,
    /// Method-specific parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

/// Returns whether `id` is one of the three JSON-RPC-legal id kinds:
/// `null`, a string, or a number. Objects and arrays are not legal ids.
#[must_use]
pub fn is_valid_request_id(id: &Value) -> bool {
    matches!(id, Value::Null | Value::String(_) | Value::Number(_))
}

/// Returns whether `value.jsonrpc == "2.0"`.
#[must_use]
pub fn is_jsonrpc_v2(value: &Value) -> bool {
    value.get("jsonrpc").and_then(Value::as_str) == Some("2.0")
}

/// Returns whether `value` looks like a JSON-RPC response (carries a
/// `result` or `error` field) rather than a request.
#[must_use]
pub fn is_jsonrpc_response(value: &Value) -> bool {
    value.get("result").is_some() || value.get("error").is_some()
}

/// Builds a success response envelope.
#[must_use]
pub fn make_response(id: Value, result: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "result": result,
    })
}

/// Builds an error response envelope. `data` is included only when given.
#[must_use]
pub fn make_error(id: Value, code: i64, message: impl Into<String>, data: Option<Value>) -> Value {
    let mut error = json!({
        "code": code,
        "message": message.into(),
    });
    if let Some(data) = data {
        error["data"] = data;
    }
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "error": error,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_ids_are_null_string_or_number() {
        assert!(is_valid_request_id(&Value::Null));
        assert!(is_valid_request_id(&json!("abc")));
        assert!(is_valid_request_id(&json!(1)));
        assert!(!is_valid_request_id(&json!({})));
        assert!(!is_valid_request_id(&json!([1, 2])));
    }

    #[test]
    fn jsonrpc_v2_check_rejects_other_versions() {
        assert!(is_jsonrpc_v2(&json!({"jsonrpc": "2.0"})));
        assert!(!is_jsonrpc_v2(&json!({"jsonrpc": "1.0"})));
        assert!(!is_jsonrpc_v2(&json!({})));
    }

    #[test]
    fn response_detection_requires_result_or_error() {
        assert!(is_jsonrpc_response(&json!({"result": 1})));
        assert!(is_jsonrpc_response(&json!({"error": {}})));
        assert!(!is_jsonrpc_response(&json!({"method": "x"})));
    }

    #[test]
    fn make_response_echoes_id_and_carries_result() {
        let resp = make_response(json!(1), json!({"ok": true}));
        assert_eq!(resp["jsonrpc"], "2.0");
        assert_eq!(resp["id"], 1);
        assert_eq!(resp["result"]["ok"], true);
    }

    #[test]
    fn make_error_omits_data_when_absent() {
        let err = make_error(json!(1), METHOD_NOT_FOUND, "nope", None);
        assert_eq!(err["error"]["code"], METHOD_NOT_FOUND);
        assert!(err["error"].get("data").is_none());
    }

    #[test]
    fn make_error_includes_data_when_given() {
        let err = make_error(Value::Null, INVALID_PARAMS, "bad", Some(json!({"field": "x"})));
        assert_eq!(err["error"]["data"]["field"], "x");
    }
}
