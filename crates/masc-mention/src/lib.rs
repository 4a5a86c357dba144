//! Parses the first `@…` token in a message body and resolves it to a
//! recipient set.
//!
//! Every function here is total: arbitrary bytes up to 1 MB (unicode,
//! newlines, runs of bare `@`) must parse in linear time and never panic.
//! There is no fallible surface, so this crate carries no error type.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

use std::collections::HashSet;

pub mod prelude;

/// The routing mode derived from the first `@` token in a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MentionMode {
    /// `@agenttype` — route to any one live agent of that type.
    Stateless(String),
    /// `@agenttype-adjective-animal` — exact-match route to one instance.
    Stateful(String),
    /// `@@target` — route to every agent whose type matches `target`, or
    /// every agent if `target == "all"`.
    Broadcast(String),
    /// No `@` token present — room-wide broadcast, no targeted delivery.
    None,
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// Finds the first `@` token in `content` and classifies it.
///
/// Returns the byte offset the token started at (the `@`, or the first `@`
/// of `@@`) and the parsed token text (without the leading `@`/`@@`).
fn find_first_token(content: &str) -> Option<(bool, &str)> {
    let at = content.find('@')?;
    let rest = &content[at..];
    let (is_broadcast, token_start) = if rest.starts_with("@@") {
        (true, 2)
    } else {
        (false, 1)
    };
    let token: &str = rest[token_start..]
        .char_indices()
        .take_while(|(_, c)| is_word_char(*c))
        .last()
        .map_or("", |(i, c)| &rest[token_start..token_start + i + c.len_utf8()]);
    if token.is_empty() {
        return None;
    }
    Some((is_broadcast, token))
}

/// Returns `true` iff `token` has the `type-adjective-animal` shape: three
/// non-empty hyphen-separated segments.
fn is_stateful_shape(token: &str) -> bool {
    let parts: Vec<&str> = token.split('-').collect();
    parts.len() == 3 && parts.iter().all(|p| !p.is_empty())
}

/// Parses the first `@` token in `content` into a [`MentionMode`].
///
/// `@@` is recognized greedily, so it is never misread as two adjacent
/// single-`@` mentions; among candidate tokens only the first one in the
/// message is considered.
pub fn parse(content: &str) -> MentionMode {
    match find_first_token(content) {
        None => MentionMode::None,
        Some((true, token)) => MentionMode::Broadcast(token.to_string()),
        Some((false, token)) if is_stateful_shape(token) => MentionMode::Stateful(token.to_string()),
        Some((false, token)) => MentionMode::Stateless(token.to_string()),
    }
}

/// Extracts just the mentioned name/target from `content`, agreeing with
/// [`parse`]: both yield `None`, or the same token text.
pub fn extract(content: &str) -> Option<String> {
    find_first_token(content).map(|(_, token)| token.to_string())
}

/// Returns the agent type portion of a mention token.
///
/// Splits only on `-`; underscores are preserved
/// (`agent_type_of_mention("claude_v2") == "claude_v2"`, but
/// `agent_type_of_mention("claude-swift-tiger") == "claude"`).
pub fn agent_type_of_mention(token: &str) -> &str {
    token.split('-').next().unwrap_or(token)
}

/// Resolves a [`MentionMode`] against the set of currently registered
/// agent names.
///
/// - `Stateless(x)`: the first agent (in `available_agents` order) whose
///   name starts with `x`.
/// - `Stateful(x)`: agents whose name exactly equals `x` (0 or 1).
/// - `Broadcast(x)`: every agent whose name starts with `x`, or every
///   agent if `x == "all"`.
/// - `None`: empty (room-wide broadcast is handled upstream, not through
///   targeted delivery).
pub fn resolve_targets(mode: &MentionMode, available_agents: &[String]) -> Vec<String> {
    match mode {
        MentionMode::Stateless(prefix) => available_agents
            .iter()
            .find(|name| name.starts_with(prefix.as_str()))
            .cloned()
            .into_iter()
            .collect(),
        MentionMode::Stateful(exact) => available_agents
            .iter()
            .filter(|name| name.as_str() == exact.as_str())
            .cloned()
            .collect(),
        MentionMode::Broadcast(target) => {
            if target == "all" {
                available_agents.to_vec()
            } else {
                available_agents
                    .iter()
                    .filter(|name| name.starts_with(target.as_str()))
                    .cloned()
                    .collect()
            }
        }
        MentionMode::None => Vec::new(),
    }
}

/// Returns whether `agent_type` is one of the room's spawnable agent
/// types.
///
/// The set of spawnable types is a room/deployment concern, not a fixed
/// constant, so it is supplied by the caller rather than hardcoded here.
pub fn is_spawnable(agent_type: &str, known_spawnable: &HashSet<String>) -> bool {
    known_spawnable.contains(agent_type)
}

/// Detects a `"  Nickname: <name>"` prefix line in `text` and returns the
/// trimmed name.
///
/// The two leading spaces are load-bearing: this mirrors the documented
/// (not the buggy) behavior of the system this was distilled from, whose
/// own `extract_nickname` has a slicing bug that always returns `None` for
/// this exact shape. That bug is not reproduced here.
pub fn extract_nickname(text: &str) -> Option<String> {
    for line in text.lines() {
        if let Some(rest) = line.strip_prefix("  Nickname: ") {
            let name = rest.trim();
            if !name.is_empty() {
                return Some(name.to_string());
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_stateless() {
        assert_eq!(parse("@gemini please review"), MentionMode::Stateless("gemini".to_string()));
    }

    #[test]
    fn parses_stateful_exact_shape() {
        assert_eq!(
            parse("@gemini-swift-tiger hello"),
            MentionMode::Stateful("gemini-swift-tiger".to_string())
        );
    }

    #[test]
    fn parses_broadcast() {
        assert_eq!(parse("@@claude status?"), MentionMode::Broadcast("claude".to_string()));
    }

    #[test]
    fn broadcast_beats_stateless_at_same_position() {
        // "@@x" must not be read as "@" followed by a stray "@x".
        assert_eq!(parse("@@x"), MentionMode::Broadcast("x".to_string()));
    }

    #[test]
    fn no_at_token_is_none() {
        assert_eq!(parse("just a normal message"), MentionMode::None);
    }

    #[test]
    fn extract_agrees_with_parse() {
        for content in ["@claude hi", "@@all go", "nothing here", "@x-y-z run"] {
            let mode = parse(content);
            let extracted = extract(content);
            match mode {
                MentionMode::Stateless(name) | MentionMode::Stateful(name) | MentionMode::Broadcast(name) => {
                    assert_eq!(extracted, Some(name));
                }
                MentionMode::None => assert_eq!(extracted, None),
            }
        }
    }

    #[test]
    fn agent_type_strips_hyphen_keeps_underscore() {
        assert_eq!(agent_type_of_mention("claude_v2"), "claude_v2");
        assert_eq!(agent_type_of_mention("claude-swift-tiger"), "claude");
    }

    #[test]
    fn resolve_stateless_picks_first_match() {
        let agents = vec!["gemini-a".to_string(), "gemini-b".to_string()];
        let targets = resolve_targets(&MentionMode::Stateless("gemini".to_string()), &agents);
        assert_eq!(targets, vec!["gemini-a".to_string()]);
    }

    #[test]
    fn resolve_broadcast_all() {
        let agents = vec!["a".to_string(), "b".to_string()];
        let targets = resolve_targets(&MentionMode::Broadcast("all".to_string()), &agents);
        assert_eq!(targets, agents);
    }

    #[test]
    fn resolve_stateful_requires_exact_match() {
        let agents = vec!["gemini-swift-tiger".to_string(), "gemini-bold-otter".to_string()];
        let targets = resolve_targets(
            &MentionMode::Stateful("gemini-swift-tiger".to_string()),
            &agents,
        );
        assert_eq!(targets, vec!["gemini-swift-tiger".to_string()]);
    }

    #[test]
    fn never_panics_on_pathological_input() {
        let huge = "@".repeat(1_000_000);
        let _ = parse(&huge);
        let unicode = "héllo @wörld-🦀-nick\n\n@@tärget".to_string();
        let _ = parse(&unicode);
        let _ = extract(&unicode);
    }

    #[test]
    fn nickname_prefix_line_is_detected() {
        let text = "intro\n  Nickname: Swift Otter\nmore text";
        assert_eq!(extract_nickname(text), Some("Swift Otter".to_string()));
    }

    #[test]
    fn nickname_requires_two_space_prefix() {
        let text = "Nickname: Swift Otter";
        assert_eq!(extract_nickname(text), None);
    }
}
