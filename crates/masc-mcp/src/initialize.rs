//! The `initialize` handshake: param validation and protocol version
//! negotiation.

use serde_json::{Value, json};

use crate::error::{McpError, McpResult};

/// The version this server reports when a client sends an unrecognized
/// (or absent) `protocolVersion`.
pub const DEFAULT_PROTOCOL_VERSION: &str = masc_room::PROTOCOL_VERSION;

const KNOWN_VERSIONS: &[&str] = &["2025-11-25", "2025-06-18", "2024-11-05"];

/// Validates `initialize`'s params: must be present (non-null) and carry a
/// string `protocolVersion`.
pub fn validate_initialize_params(params: Option<&Value>) -> McpResult<()> {
    let params = params.filter(|p| !p.is_null()).ok_or_else(|| {
        McpError::InvalidParams("initialize requires non-null params".to_string())
    })?;
    match params.get("protocolVersion") {
        Some(Value::String(_)) => Ok(()),
        _ => Err(McpError::InvalidParams(
            "initialize params.protocolVersion must be a string".to_string(),
        )),
    }
}

/// Returns `version` unchanged if it's one this server recognizes,
/// otherwise [`DEFAULT_PROTOCOL_VERSION`].
#[must_use]
pub fn normalize_protocol_version(version: &str) -> String {
    if KNOWN_VERSIONS.contains(&version) {
        version.to_string()
    } else {
        DEFAULT_PROTOCOL_VERSION.to_string()
    }
}

/// Extracts and normalizes the advertised protocol version from
/// `initialize` params, defaulting when absent or unrecognized.
#[must_use]
pub fn protocol_version_from_params(params: Option<&Value>) -> String {
    let advertised = params
        .and_then(|p| p.get("protocolVersion"))
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_PROTOCOL_VERSION);
    normalize_protocol_version(advertised)
}

/// Builds the `result` payload for a successful `initialize` response.
#[must_use]
pub fn build_initialize_result(protocol_version: &str) -> Value {
    json!({
        "protocolVersion": protocol_version,
        "serverInfo": {
            "name": "masc-mcp",
            "version": env!("CARGO_PKG_VERSION"),
        },
        "capabilities": {
            "tools": {},
        },
    })
}
