//! Layered configuration loading.
//!
//! Precedence, lowest to highest:
//!
//! 1. Embedded defaults (`Config::default()`)
//! 2. System file (`/etc/masc/config.toml`)
//! 3. User file (the OS config dir's `masc/config.toml`, via
//!    [`directories::ProjectDirs`])
//! 4. Workspace file (`{workspace_root}/.masc/config.toml`)
//! 5. Environment variables (`MASC_*`) — highest precedence, applied
//!    after every file layer has merged.

use std::path::{Path, PathBuf};

use crate::error::{ConfigError, ConfigResult};
use crate::types::{Config, EncryptionSection, TransportMode};

/// Loads configuration with the full precedence chain described on
/// [`load`], searching the OS-standard user config directory for the
/// user layer.
///
/// # Errors
///
/// [`ConfigError::Io`]/[`ConfigError::Parse`] if a present layer cannot
/// be read or parsed; [`ConfigError::InvalidEnvValue`] if a `MASC_*`
/// override does not parse.
pub fn load(workspace_root: Option<&Path>) -> ConfigResult<Config> {
    let user_path = directories::ProjectDirs::from("", "", "masc")
        .map(|dirs| dirs.config_dir().join("config.toml"));
    load_with_paths(Path::new("/etc/masc/config.toml"), user_path.as_deref(), workspace_root)
}

/// [`load`], with the system and user layer paths supplied explicitly —
/// the form tests use to avoid touching the real filesystem outside a
/// `tempfile::TempDir`.
///
/// # Errors
///
/// See [`load`].
pub fn load_with_paths(
    system_path: &Path,
    user_path: Option<&Path>,
    workspace_root: Option<&Path>,
) -> ConfigResult<Config> {
    let mut merged = toml::Value::Table(toml::value::Table::new());

    merge_layer(&mut merged, system_path)?;
    if let Some(user_path) = user_path {
        merge_layer(&mut merged, user_path)?;
    }
    if let Some(root) = workspace_root {
        merge_layer(&mut merged, &root.join(".masc").join("config.toml"))?;
    }

    let mut config: Config = merged
        .try_into()
        .map_err(|e: toml::de::Error| ConfigError::Invalid(e.to_string()))?;

    apply_env_overrides(&mut config)?;
    Ok(config)
}

/// Loads a single file with no layering — used when a caller already
/// knows the exact config file to use (e.g. `--config path/to/file`).
///
/// # Errors
///
/// [`ConfigError::Io`] if `path` cannot be read; [`ConfigError::Parse`]
/// if its contents are not valid TOML; [`ConfigError::Invalid`] if the
/// parsed document does not deserialize into [`Config`].
pub fn load_file(path: &Path) -> ConfigResult<Config> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
    toml::from_str(&contents).map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
}

/// Merges `path`'s contents (if it exists) into `merged`, overlay
/// winning on key collision. A missing file is not an error — every
/// layer above the embedded defaults is optional.
fn merge_layer(merged: &mut toml::Value, path: &Path) -> ConfigResult<()> {
    if !path.exists() {
        return Ok(());
    }
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
    let overlay: toml::Value = toml::from_str(&contents).map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })?;
    deep_merge(merged, overlay);
    Ok(())
}

/// Recursively merges `overlay` into `base`: tables merge key-by-key,
/// anything else (scalars, arrays) is replaced wholesale by the overlay
/// value.
fn deep_merge(base: &mut toml::Value, overlay: toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_value) in overlay_table {
                match base_table.get_mut(&key) {
                    Some(base_value) => deep_merge(base_value, overlay_value),
                    None => {
                        base_table.insert(key, overlay_value);
                    }
                }
            }
        }
        (base_slot, overlay_value) => *base_slot = overlay_value,
    }
}

fn apply_env_overrides(config: &mut Config) -> ConfigResult<()> {
    if let Ok(v) = std::env::var("MASC_BASE_PATH") {
        config.masc.base_path = Some(PathBuf::from(v));
    }
    if let Some(v) = env_bool("MASC_AUTH_ENABLED")? {
        config.masc.auth.enabled = v;
    }
    if let Some(v) = env_bool("MASC_AUTH_REQUIRE_TOKEN")? {
        config.masc.auth.require_token = v;
    }
    if let Some(v) = env_u64("MASC_AUTH_TOKEN_EXPIRY_HOURS")? {
        config.masc.auth.token_expiry_hours = v;
    }
    if let Some(v) = env_u32("MASC_RATE_GENERAL_LIMIT")? {
        config.masc.rate.general_limit = v;
    }
    if let Some(v) = env_u32("MASC_RATE_BROADCAST_LIMIT")? {
        config.masc.rate.broadcast_limit = v;
    }
    if let Some(v) = env_u32("MASC_RATE_TASK_OPS_LIMIT")? {
        config.masc.rate.task_ops_limit = v;
    }
    if let Some(v) = env_u64("MASC_RATE_WINDOW_SEC")? {
        config.masc.rate.window_sec = v;
    }
    if let Some(v) = env_u32("MASC_RATE_BURST_LIMIT")? {
        config.masc.rate.burst_limit = v;
    }
    if let Some(v) = env_u64("MASC_RATE_BURST_WINDOW_SEC")? {
        config.masc.rate.burst_window_sec = v;
    }
    if let Some(v) = env_u32("MASC_RETRY_MAX_ATTEMPTS")? {
        config.masc.retry.max_attempts = v;
    }
    if let Some(v) = env_u64("MASC_RETRY_INITIAL_DELAY_MS")? {
        config.masc.retry.initial_delay_ms = v;
    }
    if let Some(v) = env_u64("MASC_RETRY_MAX_DELAY_MS")? {
        config.masc.retry.max_delay_ms = v;
    }
    if let Ok(raw) = std::env::var("MASC_RETRY_BACKOFF_MULTIPLIER") {
        config.masc.retry.backoff_multiplier = raw.parse().map_err(|_| ConfigError::InvalidEnvValue {
            var: "MASC_RETRY_BACKOFF_MULTIPLIER".to_string(),
            value: raw,
        })?;
    }
    if let Some(v) = env_bool("MASC_RETRY_JITTER")? {
        config.masc.retry.jitter = v;
    }
    if let Ok(raw) = std::env::var("MASC_TRANSPORT_MODE") {
        config.masc.transport.mode = match raw.to_ascii_lowercase().as_str() {
            "stdio" => TransportMode::Stdio,
            "framed" => TransportMode::Framed,
            "line" => TransportMode::Line,
            _ => return Err(ConfigError::InvalidEnvValue { var: "MASC_TRANSPORT_MODE".to_string(), value: raw }),
        };
    }
    if let Ok(raw) = std::env::var("MASC_ENCRYPTION_KEY_SOURCE") {
        config.masc.encryption = match raw.to_ascii_lowercase().as_str() {
            "none" | "" => EncryptionSection::None,
            "direct" => EncryptionSection::Direct {
                hex: std::env::var("MASC_ENCRYPTION_KEY_HEX").unwrap_or_default(),
            },
            "env" => EncryptionSection::Env {
                var: std::env::var("MASC_ENCRYPTION_KEY_VAR").unwrap_or_default(),
            },
            "file" => EncryptionSection::File {
                path: PathBuf::from(std::env::var("MASC_ENCRYPTION_KEY_PATH").unwrap_or_default()),
            },
            _ => return Err(ConfigError::InvalidEnvValue { var: "MASC_ENCRYPTION_KEY_SOURCE".to_string(), value: raw }),
        };
    }
    Ok(())
}

fn env_bool(var: &str) -> ConfigResult<Option<bool>> {
    match std::env::var(var) {
        Ok(raw) => match raw.to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" => Ok(Some(true)),
            "0" | "false" | "no" => Ok(Some(false)),
            _ => Err(ConfigError::InvalidEnvValue { var: var.to_string(), value: raw }),
        },
        Err(_) => Ok(None),
    }
}

fn env_u32(var: &str) -> ConfigResult<Option<u32>> {
    match std::env::var(var) {
        Ok(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidEnvValue { var: var.to_string(), value: raw }),
        Err(_) => Ok(None),
    }
}

fn env_u64(var: &str) -> ConfigResult<Option<u64>> {
    match std::env::var(var) {
        Ok(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidEnvValue { var: var.to_string(), value: raw }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_layers_yield_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_with_paths(&dir.path().join("nope.toml"), None, None).unwrap();
        assert!(!config.masc.auth.enabled);
    }

    #[test]
    fn workspace_layer_overrides_user_layer() {
        let dir = tempfile::tempdir().unwrap();
        let user_path = dir.path().join("user.toml");
        std::fs::write(&user_path, "[masc.auth]\nenabled = true\nrequire_token = true\n").unwrap();

        let workspace_root = dir.path().join("workspace");
        std::fs::create_dir_all(workspace_root.join(".masc")).unwrap();
        let mut f = std::fs::File::create(workspace_root.join(".masc/config.toml")).unwrap();
        writeln!(f, "[masc.auth]\nrequire_token = false\n").unwrap();

        let config = load_with_paths(&dir.path().join("nope.toml"), Some(&user_path), Some(&workspace_root)).unwrap();
        // user sets enabled=true; workspace only overrides require_token,
        // so the merge must not clobber the sibling key.
        assert!(config.masc.auth.enabled);
        assert!(!config.masc.auth.require_token);
    }

    #[test]
    fn env_override_wins_over_every_file_layer() {
        let dir = tempfile::tempdir().unwrap();
        let user_path = dir.path().join("user.toml");
        std::fs::write(&user_path, "[masc.rate]\ngeneral_limit = 5\n").unwrap();

        unsafe {
            std::env::set_var("MASC_RATE_GENERAL_LIMIT", "999");
        }
        let config = load_with_paths(&dir.path().join("nope.toml"), Some(&user_path), None).unwrap();
        unsafe {
            std::env::remove_var("MASC_RATE_GENERAL_LIMIT");
        }
        assert_eq!(config.masc.rate.general_limit, 999);
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "this is not [ toml").unwrap();
        let err = load_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
