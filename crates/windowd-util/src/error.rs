//! Error types for windowd

use thiserror::Error;

/// Core error type for windowd value construction
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WindowdError {
    #[error("Invalid window {start_hour:02}:00-{end_hour:02}:00: {reason}")]
    InvalidWindow {
        start_hour: u32,
        end_hour: u32,
        reason: String,
    },

    #[error("Invalid unit name '{name}': {reason}")]
    InvalidUnitName { name: String, reason: String },
}

impl WindowdError {
    pub fn window(start_hour: u32, end_hour: u32, reason: impl Into<String>) -> Self {
        Self::InvalidWindow {
            start_hour,
            end_hour,
            reason: reason.into(),
        }
    }

    pub fn unit_name(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidUnitName {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, WindowdError>;
