//! Validated configuration structures

use std::path::PathBuf;
use std::time::Duration;
use windowd_util::{HourWindow, UnitName};

/// Default window start, inclusive (03:00 UTC)
pub const DEFAULT_WINDOW_START_HOUR: u32 = 3;

/// Default window end, exclusive (04:00 UTC)
pub const DEFAULT_WINDOW_END_HOUR: u32 = 4;

/// Default poll interval outside the window and on the in-window fallback path
pub const DEFAULT_CHECK_INTERVAL: Duration = Duration::from_secs(30);

/// Default slack added after the window end so the loop wakes past the boundary
pub const DEFAULT_WAKE_EPSILON: Duration = Duration::from_secs(1);

/// Default managed unit
pub const DEFAULT_UNIT: &str = "apache2";

/// Default systemctl binary, resolved through PATH
pub const DEFAULT_SYSTEMCTL: &str = "systemctl";

/// Validated configuration, immutable for the life of the process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub window: HourWindow,
    pub schedule: Schedule,
    pub service: ServiceConfig,
}

/// Sleep scheduling parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    /// Upper bound on any sleep outside the window; also the in-window fallback
    pub check_interval: Duration,

    /// Added to the sleep until window end. At least one second.
    pub wake_epsilon: Duration,
}

impl Default for Schedule {
    fn default() -> Self {
        Self {
            check_interval: DEFAULT_CHECK_INTERVAL,
            wake_epsilon: DEFAULT_WAKE_EPSILON,
        }
    }
}

/// Managed service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub unit: UnitName,
    pub systemctl: PathBuf,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            unit: default_unit(),
            systemctl: PathBuf::from(DEFAULT_SYSTEMCTL),
        }
    }
}

#[allow(clippy::expect_used)]
fn default_unit() -> UnitName {
    UnitName::parse(DEFAULT_UNIT).expect("default unit name is valid")
}
