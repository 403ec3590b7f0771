//! Countdown engine: the state machine around the shared timer record
//!
//! ```text
//!            start()                    tick reaches zero
//!   Idle ─────────────► Running ───────────────────────────► Triggered
//!    ▲                    │                                      │
//!    │      stop()        │                                      │
//!    └────────────────────┘                                      │
//!    ▲                                                           │
//!    └────────────────────────── reset() ────────────────────────┘
//! ```
//!
//! Every method takes the single state lock for a short critical section.
//! The tick task (see [`crate::tasks::countdown_timer_task`]) is the only
//! place that sleeps or runs the trigger action, and it does both with the
//! lock released. A ticker holds the `ticker_active` permit from its spawn
//! until it halts or fires.

use std::{
    sync::{Arc, Mutex, MutexGuard},
    time::Duration,
};
use futures::stream::Stream;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{
    error::CountdownError,
    services::TriggerAction,
    tasks::{countdown_timer_task, live_updates},
};
use super::{LiveUpdate, TimerSnapshot, TimerState, TriggerOutcome};

/// Time between two decrements of the countdown
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Time between two pushes to a live-update subscriber
pub const PUSH_INTERVAL: Duration = Duration::from_millis(500);

/// What `start()` did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StartStatus {
    #[serde(rename = "started")]
    Started,
    #[serde(rename = "already running")]
    AlreadyRunning,
}

impl StartStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StartStatus::Started => "started",
            StartStatus::AlreadyRunning => "already running",
        }
    }
}

/// Decision taken by one tick under the lock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TickStep {
    /// Still counting, sleep and tick again
    Continue,
    /// Reached zero with the permit released: run the action, record it, exit
    Fire { cycle: u64 },
    /// The ticker has released its permit and must exit
    Halt,
}

/// Cloneable handle to the single shared countdown
#[derive(Debug, Clone)]
pub struct CountdownEngine {
    state: Arc<Mutex<TimerState>>,
    action: Arc<TriggerAction>,
    tick_interval: Duration,
    push_interval: Duration,
}

impl CountdownEngine {
    /// Create an idle countdown of `initial_seconds` that runs `action` at zero
    pub fn new(initial_seconds: u64, action: TriggerAction) -> Self {
        Self {
            state: Arc::new(Mutex::new(TimerState::new(initial_seconds))),
            action: Arc::new(action),
            tick_interval: TICK_INTERVAL,
            push_interval: PUSH_INTERVAL,
        }
    }

    pub fn with_tick_interval(mut self, tick_interval: Duration) -> Self {
        self.tick_interval = tick_interval;
        self
    }

    pub fn with_push_interval(mut self, push_interval: Duration) -> Self {
        self.push_interval = push_interval;
        self
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    pub fn push_interval(&self) -> Duration {
        self.push_interval
    }

    pub fn action(&self) -> &TriggerAction {
        &self.action
    }

    fn lock(&self) -> Result<MutexGuard<'_, TimerState>, CountdownError> {
        self.state
            .lock()
            .map_err(|e| CountdownError::StatePoisoned(e.to_string()))
    }

    /// Start counting down.
    ///
    /// A countdown sitting at zero is reseeded from the configured duration
    /// first. A new tick task is spawned only when no ticker holds the permit;
    /// a ticker still asleep from an earlier run simply picks the run back up.
    pub fn start(&self) -> Result<StartStatus, CountdownError> {
        let spawn_ticker = {
            let mut state = self.lock()?;
            if state.running {
                debug!("Start requested but countdown is already running");
                return Ok(StartStatus::AlreadyRunning);
            }

            if state.current_time == 0 {
                state.current_time = state.initial_time;
            }
            state.running = true;

            let spawn = !state.ticker_active;
            state.ticker_active = true;
            info!("Countdown started at {}s", state.current_time);
            spawn
        };

        if spawn_ticker {
            tokio::spawn(countdown_timer_task(self.clone()));
        }

        Ok(StartStatus::Started)
    }

    /// Pause the countdown. Idempotent.
    pub fn stop(&self) -> Result<(), CountdownError> {
        let mut state = self.lock()?;
        if state.running {
            info!("Countdown stopped at {}s", state.current_time);
        }
        state.running = false;
        Ok(())
    }

    /// Return to idle at the configured duration, dropping any outcome
    pub fn reset(&self) -> Result<(), CountdownError> {
        let mut state = self.lock()?;
        state.reset();
        info!("Countdown reset to {}s", state.initial_time);
        Ok(())
    }

    /// Change the countdown duration; refused while running
    pub fn configure(&self, seconds: u64) -> Result<u64, CountdownError> {
        let mut state = self.lock()?;
        if state.running {
            warn!("Refusing to set time to {}s while running", seconds);
            return Err(CountdownError::Running);
        }

        state.initial_time = seconds;
        state.current_time = seconds;
        info!("Countdown duration set to {}s", seconds);
        Ok(seconds)
    }

    /// Consistent copy of the current state
    pub fn snapshot(&self) -> Result<TimerSnapshot, CountdownError> {
        Ok(self.lock()?.snapshot())
    }

    /// Endless stream of live updates, one per push interval, starting now.
    ///
    /// Dropping the stream unsubscribes.
    pub fn subscribe(&self) -> impl Stream<Item = LiveUpdate> + Send + 'static {
        live_updates(self.clone())
    }

    /// One tick: fire at zero, otherwise decrement
    pub(crate) fn advance(&self) -> Result<TickStep, CountdownError> {
        let mut state = self.lock()?;
        if !state.running {
            state.ticker_active = false;
            return Ok(TickStep::Halt);
        }

        if state.current_time > 0 {
            state.current_time -= 1;
            return Ok(TickStep::Continue);
        }

        // The firing ticker gives up its permit here, so a start() issued
        // while the action runs gets a fresh ticker.
        state.running = false;
        state.ticker_active = false;
        if state.triggered {
            info!("Countdown reached zero again; action already ran this cycle, reset to re-arm");
            return Ok(TickStep::Halt);
        }

        state.triggered = true;
        info!("Countdown reached zero, firing trigger action");
        Ok(TickStep::Fire { cycle: state.cycle })
    }

    /// Store the action's outcome unless its cycle was reset meanwhile
    pub(crate) fn record_outcome(
        &self,
        cycle: u64,
        outcome: TriggerOutcome,
    ) -> Result<(), CountdownError> {
        let mut state = self.lock()?;
        if state.cycle == cycle {
            state.trigger_outcome = Some(outcome);
        } else {
            warn!("Discarding trigger outcome from a cycle that was reset");
        }
        Ok(())
    }
}
