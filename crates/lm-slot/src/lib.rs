//! # lm-slot — Five-Reel Slot Engine
//!
//! A five-reel, three-row, fifteen-payline slot machine with exact payback
//! analysis. Spins are driven by a seedable generator owned by each
//! session, so runs are reproducible.
//!
//! ## Features
//!
//! - **Reference Reels**: Fixed strips paying 96.25% with a 5.15% hit frequency on one line
//! - **Shuffled Reels**: Same symbol counts, freshly permuted per session
//! - **Payline Evaluation**: Left-to-right runs with wild substitution, scatters paid once per board
//! - **Integer Stats**: Payback and hit frequency without floating-point drift
//! - **Par Sheets**: Exact figures by enumerating every stop combination
//!
//! ## Architecture
//!
//! ```text
//! GameSession
//!     │
//!     ├── SessionConfig (layout, paylines, bet, seed)
//!     ├── ReelSet (five strips)
//!     ├── Paytable (line and scatter pays)
//!     └── RandomSource (stop draws)
//!           │
//!           v
//!     Gameboard → Evaluation → SpinStats
//! ```

pub mod analysis;
pub mod config;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod paylines;
pub mod paytable;
pub mod reels;
pub mod rng;
pub mod spin;
pub mod stats;
pub mod symbols;

pub use analysis::*;
pub use config::*;
pub use engine::*;
pub use error::*;
pub use evaluator::*;
pub use paylines::*;
pub use paytable::*;
pub use reels::*;
pub use rng::*;
pub use spin::*;
pub use stats::*;
pub use symbols::*;
