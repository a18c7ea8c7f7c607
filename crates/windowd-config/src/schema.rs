//! Raw configuration schema (as parsed from TOML)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw configuration as parsed from TOML
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawConfig {
    /// Config schema version
    pub config_version: u32,

    /// Daily UTC window
    #[serde(default)]
    pub window: RawWindow,

    /// Sleep scheduling
    #[serde(default)]
    pub schedule: RawSchedule,

    /// Managed service
    #[serde(default)]
    pub service: RawServiceConfig,
}

/// Window bounds, whole UTC hours
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawWindow {
    /// Inclusive start hour (default: 3)
    pub start_hour: Option<u32>,

    /// Exclusive end hour (default: 4)
    pub end_hour: Option<u32>,
}

/// Sleep scheduling settings
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawSchedule {
    /// Longest sleep outside the window, and the fallback poll (default: 30)
    pub check_interval_seconds: Option<u64>,

    /// Added to the sleep until window end so the loop wakes after the boundary (default: 1)
    pub wake_epsilon_seconds: Option<u64>,
}

/// Managed service settings
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawServiceConfig {
    /// Unit name passed to systemctl (default: apache2)
    pub unit: Option<String>,

    /// systemctl binary (default: systemctl, resolved via PATH)
    pub systemctl: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_config() {
        let toml_str = r#"
            config_version = 1

            [window]
            start_hour = 9
            end_hour = 17

            [schedule]
            check_interval_seconds = 60
            wake_epsilon_seconds = 2

            [service]
            unit = "nginx"
            systemctl = "/usr/bin/systemctl"
        "#;

        let config: RawConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.window.start_hour, Some(9));
        assert_eq!(config.window.end_hour, Some(17));
        assert_eq!(config.schedule.check_interval_seconds, Some(60));
        assert_eq!(config.service.unit.as_deref(), Some("nginx"));
        assert_eq!(
            config.service.systemctl,
            Some(PathBuf::from("/usr/bin/systemctl"))
        );
    }

    #[test]
    fn parse_tables_are_optional() {
        let config: RawConfig = toml::from_str("config_version = 1").unwrap();
        assert!(config.window.start_hour.is_none());
        assert!(config.schedule.wake_epsilon_seconds.is_none());
        assert!(config.service.unit.is_none());
    }
}
