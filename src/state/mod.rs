//! State management module
//!
//! This module contains the countdown record, the engine guarding it, and
//! the application state shared with the HTTP handlers.

pub mod app_state;
pub mod countdown;
pub mod timer_state;

// Re-export main types
pub use app_state::AppState;
pub use countdown::{CountdownEngine, StartStatus, PUSH_INTERVAL, TICK_INTERVAL};
pub(crate) use countdown::TickStep;
pub use timer_state::{
    LiveUpdate, TimerSnapshot, TimerState, TriggerOutcome, DEFAULT_INITIAL_SECONDS,
};
