//! Timer state structure and snapshots

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Countdown length used when nothing else is configured
pub const DEFAULT_INITIAL_SECONDS: u64 = 60;

/// Result of running the trigger action once
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerOutcome {
    pub success: bool,
    /// Empty on success, otherwise a human-readable failure description
    pub detail: String,
    pub finished_at: DateTime<Utc>,
}

impl TriggerOutcome {
    /// The action exited cleanly
    pub fn succeeded() -> Self {
        Self {
            success: true,
            detail: String::new(),
            finished_at: Utc::now(),
        }
    }

    /// The action failed or could not be started
    pub fn failed(detail: impl Into<String>) -> Self {
        Self {
            success: false,
            detail: detail.into(),
            finished_at: Utc::now(),
        }
    }
}

/// Authoritative countdown record, only ever touched under the engine lock
#[derive(Debug, Clone)]
pub struct TimerState {
    pub running: bool,
    pub current_time: u64,
    pub initial_time: u64,
    /// Set once the action has been claimed for the current cycle
    pub triggered: bool,
    pub trigger_outcome: Option<TriggerOutcome>,
    /// A tick task exists, possibly asleep between ticks
    pub ticker_active: bool,
    /// Bumped by every reset so late outcomes from an older cycle are dropped
    pub cycle: u64,
}

impl TimerState {
    /// Create an idle timer seeded with `initial_time` seconds
    pub fn new(initial_time: u64) -> Self {
        Self {
            running: false,
            current_time: initial_time,
            initial_time,
            triggered: false,
            trigger_outcome: None,
            ticker_active: false,
            cycle: 0,
        }
    }

    /// Return to idle with the configured duration, keeping `initial_time`
    pub fn reset(&mut self) {
        self.running = false;
        self.current_time = self.initial_time;
        self.triggered = false;
        self.trigger_outcome = None;
        self.cycle = self.cycle.wrapping_add(1);
    }

    /// Copy the client-visible fields
    pub fn snapshot(&self) -> TimerSnapshot {
        let outcome = self.trigger_outcome.as_ref();
        TimerSnapshot {
            running: self.running,
            current_time: self.current_time,
            initial_time: self.initial_time,
            triggered: self.triggered,
            trigger_success: outcome.map(|o| o.success),
            trigger_error: outcome
                .filter(|o| !o.success)
                .map(|o| o.detail.clone()),
            triggered_at: outcome.map(|o| o.finished_at),
        }
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new(DEFAULT_INITIAL_SECONDS)
    }
}

/// Point-in-time copy of the timer returned to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub running: bool,
    pub current_time: u64,
    pub initial_time: u64,
    pub triggered: bool,
    pub trigger_success: Option<bool>,
    pub trigger_error: Option<String>,
    pub triggered_at: Option<DateTime<Utc>>,
}

/// Reduced payload pushed to live-update subscribers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveUpdate {
    pub running: bool,
    pub current_time: u64,
}

impl From<&TimerSnapshot> for LiveUpdate {
    fn from(snapshot: &TimerSnapshot) -> Self {
        Self {
            running: snapshot.running,
            current_time: snapshot.current_time,
        }
    }
}
