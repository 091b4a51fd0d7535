//! Payline catalogue

use serde::{Deserialize, Serialize};

use crate::error::{SlotError, SlotResult};
use crate::reels::REEL_COUNT;

/// Number of paylines on the machine
pub const PAYLINE_COUNT: usize = 15;

/// A payline: one row per reel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Payline {
    /// Payline index (0-based; displayed as index + 1)
    pub index: u8,
    /// Row for each reel (0 = top, 1 = middle, 2 = bottom)
    pub rows: [u8; REEL_COUNT],
}

impl Payline {
    const fn new(index: u8, rows: [u8; REEL_COUNT]) -> Self {
        Self { index, rows }
    }

    /// 1-based number shown to players
    pub fn number(&self) -> u8 {
        self.index + 1
    }

    /// (reel, row) cells along the line
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.rows
            .iter()
            .enumerate()
            .map(|(reel, &row)| (reel, row as usize))
    }
}

/// The fixed catalogue, in activation order
pub const PAYLINES: [Payline; PAYLINE_COUNT] = [
    // Straight lines
    Payline::new(0, [1, 1, 1, 1, 1]), // Middle
    Payline::new(1, [0, 0, 0, 0, 0]), // Top
    Payline::new(2, [2, 2, 2, 2, 2]), // Bottom
    // V shapes
    Payline::new(3, [0, 1, 2, 1, 0]),
    Payline::new(4, [2, 1, 0, 1, 2]),
    // Zigzag
    Payline::new(5, [0, 0, 1, 2, 2]),
    Payline::new(6, [2, 2, 1, 0, 0]),
    Payline::new(7, [1, 0, 0, 0, 1]),
    Payline::new(8, [1, 2, 2, 2, 1]),
    // W shapes
    Payline::new(9, [0, 1, 0, 1, 0]),
    Payline::new(10, [2, 1, 2, 1, 2]),
    // Diagonal
    Payline::new(11, [0, 1, 1, 1, 0]),
    Payline::new(12, [2, 1, 1, 1, 2]),
    // Steps
    Payline::new(13, [1, 1, 0, 1, 1]),
    Payline::new(14, [1, 1, 2, 1, 1]),
];

/// Payline by 0-based index
pub fn payline(index: usize) -> SlotResult<&'static Payline> {
    PAYLINES.get(index).ok_or(SlotError::InvalidPayline(index))
}

/// Number of active paylines, always within 1..=15.
///
/// Activating N paylines activates paylines 1 through N.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ActivePaylines(u8);

impl ActivePaylines {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = PAYLINE_COUNT as u8;

    pub fn new(count: u8) -> SlotResult<Self> {
        if (Self::MIN..=Self::MAX).contains(&count) {
            Ok(Self(count))
        } else {
            Err(SlotError::InvalidPaylineCount(count))
        }
    }

    /// All fifteen lines
    pub fn all() -> Self {
        Self(Self::MAX)
    }

    #[inline]
    pub fn get(self) -> u8 {
        self.0
    }

    /// The active paylines, in order
    #[inline]
    pub fn lines(self) -> &'static [Payline] {
        &PAYLINES[..self.0 as usize]
    }
}

impl Default for ActivePaylines {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl TryFrom<u8> for ActivePaylines {
    type Error = SlotError;

    fn try_from(count: u8) -> SlotResult<Self> {
        Self::new(count)
    }
}

impl From<ActivePaylines> for u8 {
    fn from(active: ActivePaylines) -> u8 {
        active.0
    }
}
