#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
//! Layered configuration loading for `masc-server`, matching spec §6's
//! "Configuration" key list.
//!
//! # Usage
//!
//! ```rust,no_run
//! use masc_config::Config;
//!
//! let config = Config::load(Some(std::path::Path::new("."))).unwrap();
//! println!("auth enabled: {}", config.masc.auth.enabled);
//! ```
//!
//! # Configuration Precedence
//!
//! From lowest to highest priority:
//!
//! 1. Embedded defaults
//! 2. System file (`/etc/masc/config.toml`)
//! 3. User file (OS config dir's `masc/config.toml`)
//! 4. Workspace file (`{workspace}/.masc/config.toml`)
//! 5. Environment variables (`MASC_*`) — applied last, so they always win
//!
//! # Design
//!
//! This crate depends only on `masc-auth`, `masc-ratelimit`, and
//! `masc-retry` for the section types they already own (`AuthConfig`,
//! `RateLimitConfig`, `RetryPolicy`) — no other internal crate, since
//! configuration is read once at startup and handed down, never read
//! back from the components it configures.

/// Configuration error types.
pub mod error;
/// Configuration file discovery and layered merging.
pub mod loader;
/// Configuration struct definitions.
pub mod types;

pub use error::{ConfigError, ConfigResult};
pub use types::{Config, EncryptionSection, MascSection, TransportMode, TransportSection};

impl Config {
    /// Loads configuration with the full precedence chain, searching the
    /// OS-standard system and user config directories and, if
    /// `workspace_root` is given, its `.masc/config.toml`.
    ///
    /// # Errors
    ///
    /// See [`loader::load`].
    pub fn load(workspace_root: Option<&std::path::Path>) -> ConfigResult<Self> {
        loader::load(workspace_root)
    }

    /// Loads a single file with no layering.
    ///
    /// # Errors
    ///
    /// See [`loader::load_file`].
    pub fn load_file(path: &std::path::Path) -> ConfigResult<Self> {
        loader::load_file(path)
    }
}
