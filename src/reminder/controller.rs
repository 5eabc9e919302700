//! Reminder Controller
//!
//! Owns the "hourly reminders" flag. While enabled, one background task emits
//! a memo reminder every [`REMINDER_INTERVAL`].
//!
//! The task and the controller share a small gate record. Every tick checks
//! the gate and emits while holding its lock, and disabling flips the gate
//! under the same lock, so once `set_enabled(false)` returns no further
//! notification can be emitted even by a tick that has already woken up.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use super::notifier::{Notification, Notifier};
use crate::config::{REMINDER_INTERVAL, REMINDER_OFF_LABEL, REMINDER_ON_LABEL};
use crate::domain::{DomainError, DomainResult};

/// Read-only view of the reminder flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderState {
    pub enabled: bool,
}

#[derive(Debug, Default)]
struct Gate {
    enabled: bool,
    /// Bumped on every transition; a task only emits for its own generation
    generation: u64,
    emitted: u64,
}

impl Gate {
    fn is_live(&self, generation: u64) -> bool {
        self.enabled && self.generation == generation
    }
}

fn lock(gate: &Mutex<Gate>) -> MutexGuard<'_, Gate> {
    gate.lock().unwrap_or_else(PoisonError::into_inner)
}

pub struct ReminderController {
    gate: Arc<Mutex<Gate>>,
    notifier: Arc<dyn Notifier>,
    runtime: Handle,
    task: Option<JoinHandle<()>>,
}

impl ReminderController {
    /// Create a disabled controller that spawns its timer on `runtime`
    pub fn new(runtime: Handle, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            gate: Arc::new(Mutex::new(Gate::default())),
            notifier,
            runtime,
            task: None,
        }
    }

    /// Create a controller on the runtime the caller is running in
    pub fn try_current(notifier: Arc<dyn Notifier>) -> DomainResult<Self> {
        let runtime = Handle::try_current()
            .map_err(|e| DomainError::Internal(format!("No tokio runtime for reminders: {}", e)))?;
        Ok(Self::new(runtime, notifier))
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        if enabled {
            self.enable();
        } else {
            self.disable();
        }
    }

    /// Flip the flag, returns the new value
    pub fn toggle(&mut self) -> bool {
        let enabled = !self.is_enabled();
        self.set_enabled(enabled);
        enabled
    }

    pub fn is_enabled(&self) -> bool {
        lock(&self.gate).enabled
    }

    pub fn snapshot(&self) -> ReminderState {
        ReminderState {
            enabled: self.is_enabled(),
        }
    }

    /// Label for the settings button
    pub fn button_label(&self) -> &'static str {
        if self.is_enabled() {
            REMINDER_OFF_LABEL
        } else {
            REMINDER_ON_LABEL
        }
    }

    /// Notifications emitted since the controller was created
    pub fn emitted_count(&self) -> u64 {
        lock(&self.gate).emitted
    }

    fn enable(&mut self) {
        let generation = {
            let mut gate = lock(&self.gate);
            if gate.enabled {
                log::debug!("Reminders already enabled");
                return;
            }
            gate.enabled = true;
            gate.generation += 1;
            gate.generation
        };

        // A previous task is already gated out by the generation bump.
        if let Some(task) = self.task.take() {
            task.abort();
        }

        self.task = Some(self.runtime.spawn(run_reminder(
            self.gate.clone(),
            self.notifier.clone(),
            REMINDER_INTERVAL,
            generation,
        )));
        log::info!("Hourly reminders enabled");
    }

    fn disable(&mut self) {
        {
            let mut gate = lock(&self.gate);
            if !gate.enabled {
                return;
            }
            gate.enabled = false;
            gate.generation += 1;
        }

        if let Some(task) = self.task.take() {
            task.abort();
        }
        log::info!("Hourly reminders disabled");
    }
}

impl Drop for ReminderController {
    fn drop(&mut self) {
        {
            let mut gate = lock(&self.gate);
            gate.enabled = false;
            gate.generation += 1;
        }
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

async fn run_reminder(
    gate: Arc<Mutex<Gate>>,
    notifier: Arc<dyn Notifier>,
    period: Duration,
    generation: u64,
) {
    let mut ticker = time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        if !dispatch(&gate, notifier.as_ref(), generation) {
            log::debug!("Reminder task {} stopped", generation);
            break;
        }
    }
}

/// Emit one reminder if `generation` is still the live one
fn dispatch(gate: &Mutex<Gate>, notifier: &dyn Notifier, generation: u64) -> bool {
    let mut gate = lock(gate);
    if !gate.is_live(generation) {
        return false;
    }
    notifier.emit(Notification::memo_reminder());
    gate.emitted += 1;
    true
}
