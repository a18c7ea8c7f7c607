//! Configuration validation

use crate::config::{
    Config, DEFAULT_SYSTEMCTL, DEFAULT_UNIT, DEFAULT_WINDOW_END_HOUR, DEFAULT_WINDOW_START_HOUR,
    Schedule, ServiceConfig,
};
use crate::schema::{RawConfig, RawSchedule, RawServiceConfig, RawWindow};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use windowd_util::{HourWindow, UnitName};

/// Validation error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("[window] {0}")]
    Window(String),

    #[error("[schedule] {field}: {message}")]
    Schedule { field: &'static str, message: String },

    #[error("[service] {field}: {message}")]
    Service { field: &'static str, message: String },
}

/// Convert a raw configuration into a [`Config`], or every reason it can't be
pub fn build_config(config: &RawConfig) -> Result<Config, Vec<ValidationError>> {
    let window = validate_window(&config.window);
    let schedule = validate_schedule(&config.schedule);
    let service = validate_service(&config.service);

    match (window, schedule, service) {
        (Ok(window), Ok(schedule), Ok(service)) => Ok(Config {
            window,
            schedule,
            service,
        }),
        (window, schedule, service) => {
            let mut errors = Vec::new();
            errors.extend(window.err());
            errors.extend(schedule.err().into_iter().flatten());
            errors.extend(service.err().into_iter().flatten());
            Err(errors)
        }
    }
}

fn validate_window(raw: &RawWindow) -> Result<HourWindow, ValidationError> {
    let start = raw.start_hour.unwrap_or(DEFAULT_WINDOW_START_HOUR);
    let end = raw.end_hour.unwrap_or(DEFAULT_WINDOW_END_HOUR);

    HourWindow::new(start, end).map_err(|e| ValidationError::Window(e.to_string()))
}

fn validate_schedule(raw: &RawSchedule) -> Result<Schedule, Vec<ValidationError>> {
    let defaults = Schedule::default();
    let mut errors = Vec::new();

    let check_interval = match raw.check_interval_seconds {
        Some(0) => {
            errors.push(ValidationError::Schedule {
                field: "check_interval_seconds",
                message: "must be greater than 0".into(),
            });
            defaults.check_interval
        }
        Some(secs) => Duration::from_secs(secs),
        None => defaults.check_interval,
    };

    let wake_epsilon = match raw.wake_epsilon_seconds {
        Some(0) => {
            errors.push(ValidationError::Schedule {
                field: "wake_epsilon_seconds",
                message: "must be at least 1".into(),
            });
            defaults.wake_epsilon
        }
        Some(secs) => Duration::from_secs(secs),
        None => defaults.wake_epsilon,
    };

    // Added to every in-window sleep; a long one sleeps through the window end
    if wake_epsilon >= check_interval {
        errors.push(ValidationError::Schedule {
            field: "wake_epsilon_seconds",
            message: format!(
                "must be less than check_interval_seconds ({})",
                check_interval.as_secs()
            ),
        });
    }

    if errors.is_empty() {
        Ok(Schedule {
            check_interval,
            wake_epsilon,
        })
    } else {
        Err(errors)
    }
}

fn validate_service(raw: &RawServiceConfig) -> Result<ServiceConfig, Vec<ValidationError>> {
    let mut errors = Vec::new();

    let unit = UnitName::parse(raw.unit.as_deref().unwrap_or(DEFAULT_UNIT)).map_err(|e| {
        ValidationError::Service {
            field: "unit",
            message: e.to_string(),
        }
    });

    let systemctl = raw
        .systemctl
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SYSTEMCTL));
    if systemctl.as_os_str().is_empty() {
        errors.push(ValidationError::Service {
            field: "systemctl",
            message: "cannot be empty".into(),
        });
    }

    match unit {
        Ok(unit) if errors.is_empty() => Ok(ServiceConfig { unit, systemctl }),
        Ok(_) => Err(errors),
        Err(e) => {
            errors.insert(0, e);
            Err(errors)
        }
    }
}
