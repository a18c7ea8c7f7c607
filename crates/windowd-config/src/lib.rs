//! Configuration parsing and validation for windowd
//!
//! Supports TOML configuration with:
//! - Versioned schema
//! - The daily UTC window, sleep scheduling, and the managed unit
//! - Built-in defaults for every field
//! - Validation with clear error messages

mod config;
mod schema;
mod validation;

pub use config::*;
pub use schema::*;
pub use validation::*;

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Validation failed: {errors:?}")]
    ValidationFailed { errors: Vec<ValidationError> },

    #[error("Unsupported config version: {0}")]
    UnsupportedVersion(u32),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Where the active configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Defaults,
}

/// Load and validate configuration from a TOML file
pub fn load_config(path: impl AsRef<Path>) -> ConfigResult<Config> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Load the configuration the daemon should run with.
///
/// An explicit path must exist. Otherwise `default_path` is used if present,
/// and the built-in defaults if not.
pub fn resolve_config(
    explicit: Option<&Path>,
    default_path: &Path,
) -> ConfigResult<(Config, ConfigSource)> {
    if let Some(path) = explicit {
        return Ok((load_config(path)?, ConfigSource::File(path.to_path_buf())));
    }

    if default_path.exists() {
        return Ok((
            load_config(default_path)?,
            ConfigSource::File(default_path.to_path_buf()),
        ));
    }

    tracing::debug!(
        default_path = %default_path.display(),
        "No config file found, using built-in defaults"
    );
    Ok((Config::default(), ConfigSource::Defaults))
}

/// Parse and validate configuration from a TOML string
pub fn parse_config(content: &str) -> ConfigResult<Config> {
    let raw: RawConfig = toml::from_str(content)?;

    // Check version
    if raw.config_version != CURRENT_CONFIG_VERSION {
        return Err(ConfigError::UnsupportedVersion(raw.config_version));
    }

    build_config(&raw).map_err(|errors| ConfigError::ValidationFailed { errors })
}

/// Current supported config version
pub const CURRENT_CONFIG_VERSION: u32 = 1;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::time::Duration;

    #[test]
    fn parse_minimal_config() {
        let config = parse_config("config_version = 1").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn parse_custom_window() {
        let config = r#"
            config_version = 1

            [window]
            start_hour = 22
            end_hour = 23

            [schedule]
            check_interval_seconds = 10

            [service]
            unit = "nginx.service"
        "#;

        let config = parse_config(config).unwrap();
        assert_eq!(config.window.start_hour(), 22);
        assert_eq!(config.window.end_hour(), 23);
        assert_eq!(config.schedule.check_interval, Duration::from_secs(10));
        assert_eq!(config.schedule.wake_epsilon, Duration::from_secs(1));
        assert_eq!(config.service.unit.as_str(), "nginx.service");
    }

    #[test]
    fn reject_wrong_version() {
        let result = parse_config("config_version = 99");
        assert!(matches!(result, Err(ConfigError::UnsupportedVersion(99))));
    }

    #[test]
    fn reject_invalid_window() {
        let config = r#"
            config_version = 1

            [window]
            start_hour = 4
            end_hour = 3
        "#;

        let result = parse_config(config);
        assert!(matches!(
            result,
            Err(ConfigError::ValidationFailed { errors }) if errors.len() == 1
        ));
    }

    #[test]
    fn reject_oversized_wake_epsilon() {
        let result =
            parse_config("config_version = 1\n[schedule]\nwake_epsilon_seconds = 9223372036854775807");
        assert!(matches!(
            result,
            Err(ConfigError::ValidationFailed { errors }) if errors.len() == 1
        ));
    }

    #[test]
    fn reject_malformed_toml() {
        let result = parse_config("config_version = ");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "config_version = 1\n[service]\nunit = \"httpd\"").unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.service.unit.as_str(), "httpd");
    }

    #[test]
    fn resolve_explicit_missing_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");

        let result = resolve_config(Some(&missing), &missing);
        assert!(matches!(result, Err(ConfigError::NotFound(p)) if p == missing));
    }

    #[test]
    fn resolve_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("config.toml");

        let (config, source) = resolve_config(None, &missing).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(source, ConfigSource::Defaults);
    }

    #[test]
    fn resolve_uses_default_path_when_present() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "config_version = 1\n[window]\nstart_hour = 1\n").unwrap();

        let (config, source) = resolve_config(None, &path).unwrap();
        assert_eq!(config.window.start_hour(), 1);
        assert_eq!(source, ConfigSource::File(path));
    }
}
