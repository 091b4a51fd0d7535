//! Error types for the slot engine

use thiserror::Error;

use crate::reels::ReelLayout;

/// Configuration errors.
///
/// Everything here is raised while building or reconfiguring a session,
/// never in the middle of a spin.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SlotError {
    #[error("Invalid payline count {0} (expected 1 through 15)")]
    InvalidPaylineCount(u8),

    #[error("Invalid bet per line: {0}")]
    InvalidBet(u32),

    #[error("Expected 5 reels, got {0}")]
    ReelCount(usize),

    #[error("Reel {0} has an empty strip")]
    EmptyReel(usize),

    #[error("Invalid payline index {0}")]
    InvalidPayline(usize),

    #[error("Session uses the {actual:?} layout, {expected:?} required")]
    LayoutMismatch {
        expected: ReelLayout,
        actual: ReelLayout,
    },

    #[error("Config error: {0}")]
    Config(String),
}

/// Result type alias
pub type SlotResult<T> = Result<T, SlotError>;
