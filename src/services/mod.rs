//! External collaborator module
//!
//! This module runs the trigger script fired when the countdown expires.

pub mod action;

// Re-export main types
pub use action::{default_working_dir, TriggerAction, DEFAULT_SHELL};
