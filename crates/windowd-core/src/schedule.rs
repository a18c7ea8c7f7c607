//! Sleep scheduling across window and day boundaries

use chrono::{DateTime, Utc};
use std::time::Duration;
use windowd_config::Schedule;
use windowd_util::HourWindow;

/// Why the loop is sleeping for the planned duration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SleepReason {
    /// Inside the window; wake just after it ends
    UntilWindowEnd { end: DateTime<Utc> },

    /// Inside the window but its end is not ahead of `now`; poll again
    BoundaryFallback,

    /// Outside the window and the next start is within the check interval
    UntilWindowStart { start: DateTime<Utc> },

    /// Outside the window; re-check after the check interval
    Recheck { next_start: DateTime<Utc> },
}

/// A sleep duration and the reason for it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SleepPlan {
    pub duration: Duration,
    pub reason: SleepReason,
}

/// Plan the sleep until the next decision point.
///
/// Inside the window the loop sleeps until today's `end_hour:00:00` plus the
/// wake epsilon, so it wakes after the boundary rather than on it. If that
/// instant is not strictly after `now` the check interval is used instead.
///
/// Outside the window the loop sleeps until the next `start_hour:00:00`
/// (today's if still ahead, else tomorrow's) but never longer than the check
/// interval, which bounds how long external drift goes unnoticed.
pub fn plan_sleep(
    now: &DateTime<Utc>,
    desired: bool,
    window: &HourWindow,
    schedule: &Schedule,
) -> SleepPlan {
    if desired {
        let end = window.end_on_day_of(now);
        return match (end - *now).to_std() {
            Ok(until_end) if !until_end.is_zero() => SleepPlan {
                duration: until_end + schedule.wake_epsilon,
                reason: SleepReason::UntilWindowEnd { end },
            },
            _ => SleepPlan {
                duration: schedule.check_interval,
                reason: SleepReason::BoundaryFallback,
            },
        };
    }

    let start = window.next_start_after(now);
    match (start - *now).to_std() {
        Ok(until_start) if !until_start.is_zero() && until_start <= schedule.check_interval => {
            SleepPlan {
                duration: until_start,
                reason: SleepReason::UntilWindowStart { start },
            }
        }
        _ => SleepPlan {
            duration: schedule.check_interval,
            reason: SleepReason::Recheck { next_start: start },
        },
    }
}

/// Duration to sleep before the next iteration. Always positive.
pub fn compute_sleep_duration(
    now: &DateTime<Utc>,
    desired: bool,
    window: &HourWindow,
    schedule: &Schedule,
) -> Duration {
    plan_sleep(now, desired, window, schedule).duration
}
