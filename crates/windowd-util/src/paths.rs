//! Default paths for windowd components
//!
//! - Config: `$XDG_CONFIG_HOME/windowd/config.toml`, `~/.config/windowd/config.toml`,
//!   or `/etc/windowd/config.toml`

use std::path::PathBuf;

/// Environment variable for overriding the config path
pub const WINDOWD_CONFIG_ENV: &str = "WINDOWD_CONFIG";

/// Config filename within the config directory
const CONFIG_FILENAME: &str = "config.toml";

/// Application subdirectory name
const APP_DIR: &str = "windowd";

/// Get the default configuration file path.
///
/// Order of precedence:
/// 1. `$XDG_CONFIG_HOME/windowd/config.toml` (if XDG_CONFIG_HOME is set)
/// 2. `~/.config/windowd/config.toml` (if HOME is set and not `/root`)
/// 3. `/etc/windowd/config.toml` (system daemon fallback)
pub fn default_config_path() -> PathBuf {
    if let Ok(config_home) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(config_home).join(APP_DIR).join(CONFIG_FILENAME);
    }

    // A root daemon reads its config from /etc rather than root's home
    if let Ok(home) = std::env::var("HOME")
        && home != "/root"
        && !home.is_empty()
    {
        return PathBuf::from(home)
            .join(".config")
            .join(APP_DIR)
            .join(CONFIG_FILENAME);
    }

    system_config_path()
}

/// Path of the system-wide configuration file
pub fn system_config_path() -> PathBuf {
    PathBuf::from("/etc").join(APP_DIR).join(CONFIG_FILENAME)
}
