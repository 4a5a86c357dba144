//! MCP session id extraction from transport headers.

use std::collections::HashMap;

const PREFERRED: &str = "mcp-session-id";
const FALLBACK: &str = "x-mcp-session-id";

/// Extracts the MCP session id from a header map, checking
/// `Mcp-Session-Id` first and `X-MCP-Session-ID` second. Header names are
/// matched case-insensitively, as headers arriving over HTTP-like
/// transports may be normalized to any case.
#[must_use]
pub fn extract_mcp_session_id(headers: &HashMap<String, String>) -> Option<String> {
    find_case_insensitive(headers, PREFERRED).or_else(|| find_case_insensitive(headers, FALLBACK))
}

fn find_case_insensitive(headers: &HashMap<String, String>, name: &str) -> Option<String> {
    headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn prefers_mcp_session_id() {
        let h = headers(&[("Mcp-Session-Id", "mcp_a"), ("X-MCP-Session-ID", "mcp_b")]);
        assert_eq!(extract_mcp_session_id(&h), Some("mcp_a".to_string()));
    }

    #[test]
    fn falls_back_to_x_header() {
        let h = headers(&[("X-MCP-Session-ID", "mcp_b")]);
        assert_eq!(extract_mcp_session_id(&h), Some("mcp_b".to_string()));
    }

    #[test]
    fn case_insensitive_match() {
        let h = headers(&[("MCP-SESSION-ID", "mcp_c")]);
        assert_eq!(extract_mcp_session_id(&h), Some("mcp_c".to_string()));
    }

    #[test]
    fn absent_is_none() {
        let h = headers(&[("Content-Type", "application/json")]);
        assert_eq!(extract_mcp_session_id(&h), None);
    }
}
