//! Desired state and reconciliation decisions

use chrono::{DateTime, Utc};
use std::fmt;
use windowd_host_api::ControlAction;
use windowd_util::HourWindow;

/// What the reconciler should do this iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    NoAction,
    Start,
    Stop,
}

impl Decision {
    /// The controller call this decision requires, if any
    pub fn action(self) -> Option<ControlAction> {
        match self {
            Self::NoAction => None,
            Self::Start => Some(ControlAction::Start),
            Self::Stop => Some(ControlAction::Stop),
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoAction => write!(f, "no-action"),
            Self::Start => write!(f, "start"),
            Self::Stop => write!(f, "stop"),
        }
    }
}

/// Whether the service should be running at `now`.
///
/// Only the hour is consulted, so transitions land on minute 0 of the
/// boundary hours no matter when the loop wakes.
pub fn is_desired_up(now: &DateTime<Utc>, window: &HourWindow) -> bool {
    window.contains(now)
}

/// Decide how to move the service from `observed` to `desired`
pub fn reconcile(desired: bool, observed: bool) -> Decision {
    match (desired, observed) {
        (true, false) => Decision::Start,
        (false, true) => Decision::Stop,
        _ => Decision::NoAction,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_reconcile_truth_table() {
        assert_eq!(reconcile(true, false), Decision::Start);
        assert_eq!(reconcile(false, true), Decision::Stop);
        assert_eq!(reconcile(true, true), Decision::NoAction);
        assert_eq!(reconcile(false, false), Decision::NoAction);
    }

    #[test]
    fn test_reconcile_is_repeatable() {
        for desired in [true, false] {
            for observed in [true, false] {
                let first = reconcile(desired, observed);
                for _ in 0..3 {
                    assert_eq!(reconcile(desired, observed), first);
                }
            }
        }
    }

    #[test]
    fn test_reconcile_exactly_one_start_and_stop() {
        let decisions: Vec<Decision> = [(true, true), (true, false), (false, true), (false, false)]
            .into_iter()
            .map(|(d, o)| reconcile(d, o))
            .collect();

        assert_eq!(decisions.iter().filter(|d| **d == Decision::Start).count(), 1);
        assert_eq!(decisions.iter().filter(|d| **d == Decision::Stop).count(), 1);
        assert_eq!(decisions.iter().filter(|d| **d == Decision::NoAction).count(), 2);
    }

    #[test]
    fn test_decision_action() {
        assert_eq!(Decision::NoAction.action(), None);
        assert_eq!(Decision::Start.action(), Some(ControlAction::Start));
        assert_eq!(Decision::Stop.action(), Some(ControlAction::Stop));
    }

    #[test]
    fn test_desired_up_for_default_window() {
        let window = HourWindow::default();

        // Every minute of a day: up iff 3 <= hour < 4, whatever the minute/second
        for hour in 0..24 {
            for minute in 0..60 {
                for second in [0, 30, 59] {
                    let now = Utc.with_ymd_and_hms(2025, 6, 1, hour, minute, second).unwrap();
                    assert_eq!(
                        is_desired_up(&now, &window),
                        hour == 3,
                        "{:02}:{:02}:{:02}",
                        hour,
                        minute,
                        second
                    );
                }
            }
        }
    }

    #[test]
    fn test_desired_up_at_boundaries() {
        let window = HourWindow::default();
        let at = |h, m, s| Utc.with_ymd_and_hms(2025, 6, 1, h, m, s).unwrap();

        assert!(!is_desired_up(&at(2, 59, 59), &window));
        assert!(is_desired_up(&at(3, 0, 0), &window));
        assert!(is_desired_up(&at(3, 59, 59), &window));
        assert!(!is_desired_up(&at(4, 0, 0), &window));
    }
}
