//! Background tasks module
//!
//! The countdown ticker and the live-update producer run alongside the
//! HTTP server and only touch the timer through the engine.

pub mod countdown_timer;
pub mod live_updates;

// Re-export main functions
pub use countdown_timer::countdown_timer_task;
pub use live_updates::live_updates;
