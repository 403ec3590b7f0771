use thiserror::Error;

/// Errors returned by countdown operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CountdownError {
    /// The duration can only change while the countdown is stopped.
    #[error("Cannot set time while running")]
    Running,

    /// A thread panicked while holding the timer lock.
    #[error("timer state lock poisoned: {0}")]
    StatePoisoned(String),
}
