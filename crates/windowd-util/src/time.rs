//! Time utilities for windowd
//!
//! All decisions are made on the UTC wall clock. The daily window is an
//! hour range, so only the hour component of the current time matters for
//! the desired state; the minute and second only matter when computing how
//! long to sleep.
//!
//! # Mock Time for Development
//!
//! In debug builds, the `WINDOWD_MOCK_TIME` environment variable can be set
//! to override the system time. The mock time is interpreted as UTC and
//! advances at the same rate as real time.
//!
//! Format: `YYYY-MM-DD HH:MM:SS` (e.g., `2025-12-25 03:59:30`)
//!
//! Example:
//! ```bash
//! WINDOWD_MOCK_TIME="2025-12-25 03:59:30" cargo run -p windowd
//! ```

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};
use std::fmt;
use std::sync::OnceLock;
use std::time::Duration;

use crate::{Result, WindowdError};

/// Environment variable name for mock time (debug builds only)
pub const MOCK_TIME_ENV_VAR: &str = "WINDOWD_MOCK_TIME";

/// Format accepted by [`MOCK_TIME_ENV_VAR`]
pub const MOCK_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Offset between mock time and real time, fixed at first use.
static MOCK_TIME_OFFSET: OnceLock<Option<chrono::Duration>> = OnceLock::new();

/// Parse a mock time string as a UTC instant.
pub fn parse_mock_time(value: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value, MOCK_TIME_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

#[allow(clippy::disallowed_methods)] // This is the internal implementation that wraps Utc::now()
fn get_mock_time_offset() -> Option<chrono::Duration> {
    *MOCK_TIME_OFFSET.get_or_init(|| {
        #[cfg(debug_assertions)]
        {
            if let Ok(mock_time_str) = std::env::var(MOCK_TIME_ENV_VAR) {
                if let Some(mock_dt) = parse_mock_time(&mock_time_str) {
                    let offset = mock_dt.signed_duration_since(Utc::now());
                    tracing::info!(
                        mock_time = %mock_time_str,
                        offset_secs = offset.num_seconds(),
                        "Mock time enabled"
                    );
                    return Some(offset);
                }
                tracing::warn!(
                    mock_time = %mock_time_str,
                    expected_format = MOCK_TIME_FORMAT,
                    "Invalid mock time format"
                );
            }
            None
        }
        #[cfg(not(debug_assertions))]
        {
            None
        }
    })
}

/// Returns whether mock time is currently active.
pub fn is_mock_time_active() -> bool {
    get_mock_time_offset().is_some()
}

/// Get the current UTC time, respecting mock time settings in debug builds.
#[allow(clippy::disallowed_methods)] // This is the wrapper that provides mock time support
pub fn now() -> DateTime<Utc> {
    let real_now = Utc::now();

    match get_mock_time_offset() {
        Some(offset) => real_now + offset,
        None => real_now,
    }
}

/// Format a UTC instant with full date and time.
pub fn format_datetime_full(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// The instant `hour:00:00` UTC on `date`
pub fn hour_on(date: NaiveDate, hour: u32) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc() + chrono::Duration::hours(i64::from(hour))
}

/// Daily UTC hour window `[start_hour:00, end_hour:00)`.
///
/// The window never wraps midnight: `start_hour < end_hour`, both below 24.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HourWindow {
    start_hour: u32,
    end_hour: u32,
}

impl HourWindow {
    pub fn new(start_hour: u32, end_hour: u32) -> Result<Self> {
        if start_hour >= 24 {
            return Err(WindowdError::window(
                start_hour,
                end_hour,
                "start_hour must be in 0..24",
            ));
        }
        if end_hour >= 24 {
            return Err(WindowdError::window(
                start_hour,
                end_hour,
                "end_hour must be in 0..24",
            ));
        }
        if start_hour >= end_hour {
            return Err(WindowdError::window(
                start_hour,
                end_hour,
                "start_hour must be before end_hour",
            ));
        }

        Ok(Self {
            start_hour,
            end_hour,
        })
    }

    pub fn start_hour(&self) -> u32 {
        self.start_hour
    }

    pub fn end_hour(&self) -> u32 {
        self.end_hour
    }

    /// Length of the window
    pub fn length(&self) -> Duration {
        Duration::from_secs(u64::from(self.end_hour - self.start_hour) * 3600)
    }

    /// Check whether `now` falls within the window. Only the hour is consulted.
    pub fn contains(&self, now: &DateTime<Utc>) -> bool {
        let hour = now.hour();
        self.start_hour <= hour && hour < self.end_hour
    }

    /// Today's window end, `end_hour:00:00` on the date of `now`
    pub fn end_on_day_of(&self, now: &DateTime<Utc>) -> DateTime<Utc> {
        hour_on(now.date_naive(), self.end_hour)
    }

    /// The next `start_hour:00:00` strictly after `now`: today's if still
    /// ahead, otherwise tomorrow's
    pub fn next_start_after(&self, now: &DateTime<Utc>) -> DateTime<Utc> {
        let today = hour_on(now.date_naive(), self.start_hour);
        if today > *now {
            today
        } else {
            today + chrono::Duration::days(1)
        }
    }
}

impl Default for HourWindow {
    /// 03:00-04:00 UTC
    fn default() -> Self {
        Self {
            start_hour: 3,
            end_hour: 4,
        }
    }
}

impl fmt::Display for HourWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:00-{:02}:00 UTC", self.start_hour, self.end_hour)
    }
}

/// Helper to format durations in human-readable form
pub fn format_duration(d: Duration) -> String {
    let total_secs = d.as_secs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}
