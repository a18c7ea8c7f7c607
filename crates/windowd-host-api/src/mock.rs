//! Mock controller and clock for testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use windowd_util::UnitName;

use crate::{
    Clock, ControlAction, ControlError, ControlResult, ServiceState, SleepOutcome,
    StateController,
};

/// In-memory service for unit/integration testing
pub struct MockController {
    unit: UnitName,
    active: Arc<Mutex<bool>>,
    start_calls: AtomicUsize,
    stop_calls: AtomicUsize,
    query_calls: AtomicUsize,

    /// Configure start to fail with this message
    pub fail_start: Arc<Mutex<Option<String>>>,

    /// Configure stop to fail with this message
    pub fail_stop: Arc<Mutex<Option<String>>>,
}

impl MockController {
    pub fn new(unit: UnitName) -> Self {
        Self {
            unit,
            active: Arc::new(Mutex::new(false)),
            start_calls: AtomicUsize::new(0),
            stop_calls: AtomicUsize::new(0),
            query_calls: AtomicUsize::new(0),
            fail_start: Arc::new(Mutex::new(None)),
            fail_stop: Arc::new(Mutex::new(None)),
        }
    }

    pub fn running(self) -> Self {
        self.set_active(true);
        self
    }

    /// Change the service state behind the reconciler's back
    pub fn set_active(&self, active: bool) {
        *self.active.lock().unwrap() = active;
    }

    pub fn active(&self) -> bool {
        *self.active.lock().unwrap()
    }

    pub fn start_calls(&self) -> usize {
        self.start_calls.load(Ordering::SeqCst)
    }

    pub fn stop_calls(&self) -> usize {
        self.stop_calls.load(Ordering::SeqCst)
    }

    pub fn query_calls(&self) -> usize {
        self.query_calls.load(Ordering::SeqCst)
    }

    fn transition(&self, action: ControlAction) -> ControlResult<()> {
        let failure = match action {
            ControlAction::Start => self.fail_start.lock().unwrap().clone(),
            ControlAction::Stop => self.fail_stop.lock().unwrap().clone(),
        };
        if let Some(message) = failure {
            return Err(ControlError::Operational {
                action,
                unit: self.unit.clone(),
                message,
            });
        }

        let mut active = self.active.lock().unwrap();
        let target = action.target_state();
        if ServiceState::from_active(*active) == target {
            return Err(ControlError::AlreadyInState {
                unit: self.unit.clone(),
                state: target,
            });
        }

        *active = target == ServiceState::Active;
        Ok(())
    }
}

#[async_trait]
impl StateController for MockController {
    fn unit(&self) -> &UnitName {
        &self.unit
    }

    async fn start(&self) -> ControlResult<()> {
        self.start_calls.fetch_add(1, Ordering::SeqCst);
        self.transition(ControlAction::Start)
    }

    async fn stop(&self) -> ControlResult<()> {
        self.stop_calls.fetch_add(1, Ordering::SeqCst);
        self.transition(ControlAction::Stop)
    }

    async fn is_active(&self) -> bool {
        self.query_calls.fetch_add(1, Ordering::SeqCst);
        self.active()
    }
}

/// Manually driven clock: sleeping advances mock time instantly
pub struct MockClock {
    now: Mutex<DateTime<Utc>>,
    sleeps: Mutex<Vec<Duration>>,
    cancel_after: Mutex<Option<usize>>,
}

impl MockClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
            sleeps: Mutex::new(Vec::new()),
            cancel_after: Mutex::new(None),
        }
    }

    /// Fire the cancellation token during the `n`th sleep (1-based)
    pub fn cancel_after(self, n: usize) -> Self {
        *self.cancel_after.lock().unwrap() = Some(n);
        self
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap();
        *now += chrono::Duration::from_std(by).unwrap();
    }

    /// Every sleep requested so far, including one cut short by cancellation
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap().clone()
    }
}

#[async_trait]
impl Clock for MockClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }

    async fn sleep(&self, duration: Duration, cancel: &CancellationToken) -> SleepOutcome {
        if cancel.is_cancelled() {
            return SleepOutcome::Cancelled;
        }

        let count = {
            let mut sleeps = self.sleeps.lock().unwrap();
            sleeps.push(duration);
            sleeps.len()
        };

        if *self.cancel_after.lock().unwrap() == Some(count) {
            cancel.cancel();
            return SleepOutcome::Cancelled;
        }

        self.advance(duration);
        SleepOutcome::Elapsed
    }
}
