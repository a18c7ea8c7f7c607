//! Service state controller trait

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;
use windowd_util::UnitName;

/// Running state of the managed service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceState {
    Active,
    Inactive,
}

impl ServiceState {
    pub fn from_active(active: bool) -> Self {
        if active { Self::Active } else { Self::Inactive }
    }
}

impl fmt::Display for ServiceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Inactive => write!(f, "inactive"),
        }
    }
}

/// A state change the controller can carry out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    Start,
    Stop,
}

impl ControlAction {
    /// State the service is in once the action has taken effect
    pub fn target_state(self) -> ServiceState {
        match self {
            Self::Start => ServiceState::Active,
            Self::Stop => ServiceState::Inactive,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Stop => "stop",
        }
    }
}

impl fmt::Display for ControlAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors from start/stop requests
#[derive(Debug, Error)]
pub enum ControlError {
    /// The service was already in the requested state
    #[error("{unit} is already {state}")]
    AlreadyInState { unit: UnitName, state: ServiceState },

    /// The service manager refused or failed the request
    #[error("{action} {unit} failed: {message}")]
    Operational {
        action: ControlAction,
        unit: UnitName,
        message: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ControlError {
    /// Whether the failure needs no follow-up (the service is where it should be)
    pub fn is_benign(&self) -> bool {
        matches!(self, Self::AlreadyInState { .. })
    }
}

pub type ControlResult<T> = Result<T, ControlError>;

/// Starts, stops, and queries one managed service.
///
/// Implementations must not treat "already in the requested state" as a
/// hard failure; report it as [`ControlError::AlreadyInState`].
#[async_trait]
pub trait StateController: Send + Sync {
    /// The unit this controller manages
    fn unit(&self) -> &UnitName;

    /// Request the service to start
    async fn start(&self) -> ControlResult<()>;

    /// Request the service to stop
    async fn stop(&self) -> ControlResult<()>;

    /// Whether the service is currently running. Failures to query read as
    /// not running.
    async fn is_active(&self) -> bool;

    /// Carry out `action`
    async fn apply(&self, action: ControlAction) -> ControlResult<()> {
        match action {
            ControlAction::Start => self.start().await,
            ControlAction::Stop => self.stop().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_target_state() {
        assert_eq!(ControlAction::Start.target_state(), ServiceState::Active);
        assert_eq!(ControlAction::Stop.target_state(), ServiceState::Inactive);
    }

    #[test]
    fn already_in_state_is_benign() {
        let unit = UnitName::parse("apache2").unwrap();
        let err = ControlError::AlreadyInState {
            unit: unit.clone(),
            state: ServiceState::Active,
        };
        assert!(err.is_benign());
        assert_eq!(err.to_string(), "apache2 is already active");

        let err = ControlError::Operational {
            action: ControlAction::Stop,
            unit,
            message: "Access denied".into(),
        };
        assert!(!err.is_benign());
        assert_eq!(err.to_string(), "stop apache2 failed: Access denied");
    }
}
