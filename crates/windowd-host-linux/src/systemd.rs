//! systemd unit control through the `systemctl` command line

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};
use tokio::process::Command;
use tracing::{debug, warn};
use windowd_host_api::{ControlAction, ControlError, ControlResult, ServiceState, StateController};
use windowd_util::UnitName;

/// Controls one systemd unit by invoking `systemctl`
pub struct SystemdController {
    unit: UnitName,
    systemctl: PathBuf,
}

impl SystemdController {
    pub fn new(unit: UnitName, systemctl: impl Into<PathBuf>) -> Self {
        Self {
            unit,
            systemctl: systemctl.into(),
        }
    }

    pub fn systemctl(&self) -> &Path {
        &self.systemctl
    }

    async fn systemctl_output(&self, verb: &str) -> std::io::Result<Output> {
        Command::new(&self.systemctl)
            .arg(verb)
            .arg(self.unit.as_str())
            .stdin(Stdio::null())
            .output()
            .await
    }

    async fn run_action(&self, action: ControlAction) -> ControlResult<()> {
        let output = self.systemctl_output(action.as_str()).await?;

        if output.status.success() {
            debug!(unit = %self.unit, action = %action, "systemctl succeeded");
            return Ok(());
        }

        // A failed request is benign if the unit already sits in the target state
        let target = action.target_state();
        if ServiceState::from_active(self.is_active().await) == target {
            return Err(ControlError::AlreadyInState {
                unit: self.unit.clone(),
                state: target,
            });
        }

        Err(ControlError::Operational {
            action,
            unit: self.unit.clone(),
            message: describe_failure(&output),
        })
    }
}

#[async_trait]
impl StateController for SystemdController {
    fn unit(&self) -> &UnitName {
        &self.unit
    }

    async fn start(&self) -> ControlResult<()> {
        self.run_action(ControlAction::Start).await
    }

    async fn stop(&self) -> ControlResult<()> {
        self.run_action(ControlAction::Stop).await
    }

    async fn is_active(&self) -> bool {
        match self.systemctl_output("is-active").await {
            Ok(output) => parse_is_active(&output.stdout),
            Err(e) => {
                warn!(
                    unit = %self.unit,
                    systemctl = %self.systemctl.display(),
                    error = %e,
                    "Failed to query unit state, treating as inactive"
                );
                false
            }
        }
    }
}

/// `systemctl is-active` prints the state on stdout; only `active` counts.
/// The exit status is not consulted: it is non-zero for every other state.
fn parse_is_active(stdout: &[u8]) -> bool {
    String::from_utf8_lossy(stdout).trim() == "active"
}

fn describe_failure(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stderr = stderr.trim();
    if stderr.is_empty() {
        output.status.to_string()
    } else {
        format!("{}: {}", output.status, stderr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit() -> UnitName {
        UnitName::parse("apache2").unwrap()
    }

    #[test]
    fn parse_is_active_states() {
        assert!(parse_is_active(b"active\n"));
        assert!(parse_is_active(b"active"));
        assert!(!parse_is_active(b"inactive\n"));
        assert!(!parse_is_active(b"activating\n"));
        assert!(!parse_is_active(b"failed\n"));
        assert!(!parse_is_active(b""));
    }

    #[test]
    fn configured_systemctl_path_is_kept() {
        let controller = SystemdController::new(unit(), "/usr/bin/systemctl");
        assert_eq!(controller.systemctl(), Path::new("/usr/bin/systemctl"));
        assert_eq!(controller.unit().as_str(), "apache2");
    }

    #[tokio::test]
    async fn missing_systemctl_reads_inactive() {
        let controller = SystemdController::new(unit(), "/nonexistent/windowd-systemctl");
        assert!(!controller.is_active().await);
    }

    #[tokio::test]
    async fn missing_systemctl_is_io_error() {
        let controller = SystemdController::new(unit(), "/nonexistent/windowd-systemctl");
        let err = controller.start().await.unwrap_err();
        assert!(matches!(err, ControlError::Io(_)));
    }

    #[tokio::test]
    async fn zero_exit_is_success() {
        // `true` accepts any arguments and exits 0
        let controller = SystemdController::new(unit(), "true");
        controller.start().await.unwrap();
        controller.stop().await.unwrap();
        assert!(!controller.is_active().await);
    }

    #[tokio::test]
    async fn failed_start_while_inactive_is_operational() {
        // `false` fails every verb and prints nothing, so the unit reads inactive
        let controller = SystemdController::new(unit(), "false");
        let err = controller.start().await.unwrap_err();
        assert!(matches!(
            err,
            ControlError::Operational { action: ControlAction::Start, .. }
        ));
    }

    #[tokio::test]
    async fn failed_stop_while_inactive_is_already_in_state() {
        let controller = SystemdController::new(unit(), "false");
        let err = controller.stop().await.unwrap_err();
        assert!(matches!(
            err,
            ControlError::AlreadyInState { state: ServiceState::Inactive, .. }
        ));
        assert!(err.is_benign());
    }
}
