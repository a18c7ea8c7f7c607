//! The reconciliation loop

use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use windowd_config::{Config, Schedule};
use windowd_host_api::{Clock, ControlAction, SleepOutcome, StateController};
use windowd_util::{HourWindow, format_duration};

use crate::{Decision, SleepPlan, SleepReason, is_desired_up, plan_sleep, reconcile};

/// Result of carrying out a start/stop decision
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The controller carried out the request
    Applied,
    /// The service was already in the requested state
    AlreadyInState,
    /// The request failed; retried on a later iteration
    Failed(String),
}

/// Report of one pass through the loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Iteration {
    pub now: DateTime<Utc>,
    pub desired: bool,
    pub observed: bool,
    pub decision: Decision,
    pub outcome: Option<ActionOutcome>,
    pub sleep: SleepPlan,
}

/// Keeps one service running inside its daily UTC window and stopped outside it.
///
/// Holds no state between iterations: desired state comes from the clock and
/// observed state from the controller, both read fresh every pass.
pub struct WindowReconciler {
    window: HourWindow,
    schedule: Schedule,
    controller: Arc<dyn StateController>,
    clock: Arc<dyn Clock>,
}

impl WindowReconciler {
    pub fn new(
        window: HourWindow,
        schedule: Schedule,
        controller: Arc<dyn StateController>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            window,
            schedule,
            controller,
            clock,
        }
    }

    pub fn from_config(
        config: &Config,
        controller: Arc<dyn StateController>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self::new(config.window, config.schedule, controller, clock)
    }

    pub fn window(&self) -> &HourWindow {
        &self.window
    }

    /// Run one iteration: read time and state, correct any mismatch, and plan
    /// the following sleep. Start/stop failures are logged, never returned.
    pub async fn step(&self) -> Iteration {
        let now = self.clock.now();
        let desired = is_desired_up(&now, &self.window);
        let observed = self.controller.is_active().await;
        let decision = reconcile(desired, observed);

        debug!(
            now = %now,
            desired,
            observed,
            decision = %decision,
            "Evaluated window"
        );

        let outcome = match decision.action() {
            Some(action) => Some(self.execute(action).await),
            None => None,
        };

        let sleep = plan_sleep(&now, desired, &self.window, &self.schedule);
        self.log_sleep(now, &sleep);

        Iteration {
            now,
            desired,
            observed,
            decision,
            outcome,
            sleep,
        }
    }

    /// Reconcile until `cancel` fires. Returns the number of iterations run.
    pub async fn run(&self, cancel: CancellationToken) -> u64 {
        info!(
            unit = %self.controller.unit(),
            window = %self.window,
            check_interval_secs = self.schedule.check_interval.as_secs(),
            "Window reconciler running"
        );

        let mut iterations = 0;
        while !cancel.is_cancelled() {
            let iteration = self.step().await;
            iterations += 1;

            if self.clock.sleep(iteration.sleep.duration, &cancel).await == SleepOutcome::Cancelled {
                break;
            }
        }

        info!(iterations, "Window reconciler stopped");
        iterations
    }

    async fn execute(&self, action: ControlAction) -> ActionOutcome {
        let unit = self.controller.unit();

        match self.controller.apply(action).await {
            Ok(()) => {
                info!(unit = %unit, action = %action, "Service {} request applied", action);
                ActionOutcome::Applied
            }
            Err(e) if e.is_benign() => {
                info!(unit = %unit, action = %action, reason = %e, "Nothing to do");
                ActionOutcome::AlreadyInState
            }
            Err(e) => {
                warn!(
                    unit = %unit,
                    action = %action,
                    error = %e,
                    "Service {} failed, will retry next iteration",
                    action
                );
                ActionOutcome::Failed(e.to_string())
            }
        }
    }

    fn log_sleep(&self, now: DateTime<Utc>, plan: &SleepPlan) {
        let sleep_secs = plan.duration.as_secs();
        match plan.reason {
            SleepReason::UntilWindowEnd { end } => info!(
                sleep_secs,
                end = %end,
                end_hour = self.window.end_hour(),
                "In window; sleeping {} until window end",
                format_duration(plan.duration)
            ),
            SleepReason::BoundaryFallback => debug!(
                sleep_secs,
                "Window end already reached; re-checking after fallback interval"
            ),
            SleepReason::UntilWindowStart { start } => info!(
                sleep_secs,
                start = %start,
                "Outside window; sleeping until window start"
            ),
            SleepReason::Recheck { next_start } => info!(
                sleep_secs,
                next_start = %next_start,
                until_start = %format_duration(until(now, next_start)),
                "Outside window; sleeping before re-evaluating"
            ),
        }
    }
}

fn until(now: DateTime<Utc>, then: DateTime<Utc>) -> Duration {
    (then - now).to_std().unwrap_or_default()
}
