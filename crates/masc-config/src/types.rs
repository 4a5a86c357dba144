//! Configuration struct definitions, matching spec §6's "Configuration"
//! key list one section at a time.
//!
//! Every section implements [`Default`] and is `#[serde(default)]`, so a
//! bare `[masc]` header (or no file at all) produces a working,
//! fully-permissive configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use masc_auth::AuthConfig;
use masc_ratelimit::RateLimitConfig;
use masc_retry::RetryPolicy;

/// Root configuration for a `masc-server` process.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// The `[masc]` section: everything this server reads at startup.
    pub masc: MascSection,
}

/// The `[masc]` table: room location plus the four `[masc.*]`
/// sub-sections.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MascSection {
    /// `masc.base_path` — where the room's filesystem backend is rooted.
    /// Empty means "use the memory backend" (see
    /// [`crate::loader::resolve_base_path`]).
    pub base_path: Option<PathBuf>,
    /// `masc.auth.*`.
    pub auth: AuthConfig,
    /// `masc.rate.*`.
    pub rate: RateLimitConfig,
    /// `masc.retry.*`.
    pub retry: RetryPolicy,
    /// `masc.transport.*`.
    pub transport: TransportSection,
    /// `masc.encryption.*`.
    pub encryption: EncryptionSection,
}

impl Default for MascSection {
    fn default() -> Self {
        Self {
            base_path: None,
            auth: AuthConfig::default(),
            rate: RateLimitConfig::default(),
            retry: RetryPolicy::default(),
            transport: TransportSection::default(),
            encryption: EncryptionSection::default(),
        }
    }
}

/// `masc.transport.mode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    /// Newline-delimited JSON over stdio, framing auto-detected per
    /// connection (the common case — "stdio" covers both framings).
    Stdio,
    /// Force `Content-Length:`-framed JSON regardless of what the first
    /// inbound line looks like.
    Framed,
    /// Force newline-delimited JSON regardless of what the first inbound
    /// line looks like.
    Line,
}

impl Default for TransportMode {
    fn default() -> Self {
        Self::Stdio
    }
}

/// `masc.transport.*`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportSection {
    /// The configured transport mode.
    pub mode: TransportMode,
}

impl Default for TransportSection {
    fn default() -> Self {
        Self { mode: TransportMode::default() }
    }
}

/// `masc.encryption.key_source`: where the at-rest encryption key (if
/// any) comes from. `None` (the default) means persisted values are
/// stored in the clear — encryption is opt-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "key_source", rename_all = "lowercase")]
pub enum EncryptionSection {
    /// No at-rest encryption configured.
    #[default]
    None,
    /// The key is the given 64 hex chars, taken directly from the config
    /// file. Convenient for tests; discouraged for production secrets
    /// since it lands in the merged config (and any file it was loaded
    /// from).
    Direct {
        /// 64 hex characters (32 bytes).
        hex: String,
    },
    /// The key is 64 hex chars read from the named environment variable
    /// at startup.
    Env {
        /// The environment variable to read.
        var: String,
    },
    /// The key is 64 hex chars read from the given file at startup.
    File {
        /// Path to the key file.
        path: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_masc_header_deserializes_to_defaults() {
        let config: Config = toml::from_str("[masc]\n").unwrap();
        assert_eq!(config.masc.base_path, None);
        assert!(!config.masc.auth.enabled);
        assert_eq!(config.masc.rate.general_limit, 60);
        assert_eq!(config.masc.retry.max_attempts, 3);
        assert_eq!(config.masc.transport.mode, TransportMode::Stdio);
        assert_eq!(config.masc.encryption, EncryptionSection::None);
    }

    #[test]
    fn empty_document_also_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.masc.rate.broadcast_limit, 20);
    }

    #[test]
    fn encryption_direct_round_trips() {
        let toml_str = r#"
            [masc.encryption]
            key_source = "direct"
            hex = "00"
        "#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.masc.encryption,
            EncryptionSection::Direct { hex: "00".to_string() }
        );
    }
}
