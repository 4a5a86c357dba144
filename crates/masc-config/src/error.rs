//! Configuration error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A config file existed but could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// The file that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A config file's contents were not valid TOML.
    #[error("failed to parse {path}: {source}")]
    Parse {
        /// The file that failed to parse.
        path: PathBuf,
        /// The underlying parse error.
        #[source]
        source: toml::de::Error,
    },

    /// A layer merged cleanly but the result did not deserialize into
    /// [`crate::Config`] (a field had the wrong shape).
    #[error("invalid configuration: {0}")]
    Invalid(String),

    /// An environment variable override had an unrecognized value (e.g.
    /// `MASC_TRANSPORT_MODE=carrier-pigeon`).
    #[error("invalid value for {var}: {value:?}")]
    InvalidEnvValue {
        /// The offending environment variable's name.
        var: String,
        /// The value that could not be parsed.
        value: String,
    },
}

/// Convenience alias for fallible configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
