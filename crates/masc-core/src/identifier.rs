//! Shared validation rules for room-scoped identifiers.
//!
//! Agent names and storage keys both forbid the same handful of shapes:
//! empty strings, raw path separators, a leading colon, and `..` segments
//! once colons have been expanded to path separators. Centralizing the
//! rule keeps `masc-storage`'s key validation and `masc-room`'s agent name
//! validation from drifting apart.

/// Why an identifier was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierError {
    /// The identifier was empty.
    Empty,
    /// The identifier contains a literal `/` or `\`.
    PathSeparator,
    /// The identifier starts with `:`.
    LeadingColon,
    /// The identifier contains a `..` path segment, found after expanding
    /// `:` separators to `/`.
    DotDotSegment,
}

impl IdentifierError {
    /// A short, stable machine-readable reason string.
    pub fn as_str(self) -> &'static str {
        match self {
            IdentifierError::Empty => "empty",
            IdentifierError::PathSeparator => "path_separator",
            IdentifierError::LeadingColon => "leading_colon",
            IdentifierError::DotDotSegment => "dot_dot_segment",
        }
    }
}

/// Validates an identifier against the shared rule set.
///
/// `name` for agent names, or a storage key for `masc-storage`. Both call
/// sites share this function so the rule never quietly diverges between
/// them.
pub fn validate_identifier(name: &str) -> Result<(), IdentifierError> {
    if name.is_empty() {
        return Err(IdentifierError::Empty);
    }
    if name.contains('/') || name.contains('\\') {
        return Err(IdentifierError::PathSeparator);
    }
    if name.starts_with(':') {
        return Err(IdentifierError::LeadingColon);
    }
    let expanded = name.replace(':', "/");
    if expanded.split('/').any(|segment| segment == "..") {
        return Err(IdentifierError::DotDotSegment);
    }
    Ok(())
}
