//! Trapdoor - A dead-man's-switch countdown server
//!
//! This library provides a single shared countdown that can be started,
//! stopped, reset and reconfigured over HTTP, and that runs an external
//! script exactly once when it reaches zero.

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use error::CountdownError;
pub use services::TriggerAction;
pub use state::{AppState, CountdownEngine, StartStatus, TimerSnapshot};
pub use utils::signals::shutdown_signal;
