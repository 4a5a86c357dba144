//! Transport framing detection: newline-delimited JSON vs.
//! `Content-Length:`-framed messages.

/// The wire framing a connection uses for the rest of its lifetime,
/// selected once from the first inbound line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportMode {
    /// One JSON value per newline-terminated line.
    LineDelimited,
    /// `Content-Length: N\r\n\r\n` followed by exactly `N` bytes of JSON.
    Framed,
}

/// Inspects `first_line` and decides the transport's framing mode.
///
/// Case-insensitively matches a `content-length:` prefix; anything else
/// is line-delimited.
#[must_use]
pub fn detect_mode(first_line: &str) -> TransportMode {
    if first_line.to_ascii_lowercase().starts_with("content-length:") {
        TransportMode::Framed
    } else {
        TransportMode::LineDelimited
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_content_length_case_insensitively() {
        assert_eq!(detect_mode("Content-Length: 42"), TransportMode::Framed);
        assert_eq!(detect_mode("CONTENT-LENGTH: 42"), TransportMode::Framed);
        assert_eq!(detect_mode("content-length: 42"), TransportMode::Framed);
    }

    #[test]
    fn anything_else_is_line_delimited() {
        assert_eq!(detect_mode("{\"jsonrpc\":\"2.0\"}"), TransportMode::LineDelimited);
        assert_eq!(detect_mode(""), TransportMode::LineDelimited);
    }
}
