//! LM-Sim — Parallel Bulk Simulation
//!
//! Splits a large spin count across independent, seeded game sessions on a
//! rayon thread pool and merges their statistics.
//!
//! ## Architecture
//!
//! ```text
//! BatchConfig ──→ partition ──→ [Session 0] [Session 1] ... [Session N]
//!                                    │            │               │
//!                                    └──── ProgressTracker ───────┘
//!                                                 │
//!                                                 v
//!                                  BatchReport (merged SpinStats)
//! ```

pub mod batch;
pub mod config;
pub mod error;
pub mod progress;

pub use batch::*;
pub use config::*;
pub use error::*;
pub use progress::*;
