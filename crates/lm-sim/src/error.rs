//! Error types for batch simulation

use lm_slot::SlotError;
use thiserror::Error;

/// Batch simulation errors
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Session error: {0}")]
    Slot(#[from] SlotError),

    #[error("Batch needs at least one worker")]
    NoWorkers,

    #[error("Thread pool error: {0}")]
    ThreadPool(String),
}

/// Result type alias
pub type SimResult<T> = Result<T, SimError>;
