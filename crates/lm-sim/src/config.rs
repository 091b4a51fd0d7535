//! Batch configuration

use lm_slot::SessionConfig;
use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};

/// A bulk run split across worker sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Settings shared by every worker session
    pub session: SessionConfig,
    /// Spins across all workers
    pub total_spins: u64,
    /// Worker count; `None` uses one per CPU
    pub workers: Option<usize>,
    /// Worker `i` is seeded with `base_seed + i`; `None` falls back to
    /// the session seed, then to the OS
    pub base_seed: Option<u64>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            session: SessionConfig::default(),
            total_spins: 1_000_000,
            workers: None,
            base_seed: None,
        }
    }
}

impl BatchConfig {
    pub fn new(session: SessionConfig, total_spins: u64) -> Self {
        Self {
            session,
            total_spins,
            ..Self::default()
        }
    }

    /// Set worker count
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    /// Set base seed
    pub fn with_base_seed(mut self, seed: u64) -> Self {
        self.base_seed = Some(seed);
        self
    }

    /// Resolved worker count
    pub fn worker_count(&self) -> SimResult<usize> {
        match self.workers {
            Some(0) => Err(SimError::NoWorkers),
            Some(n) => Ok(n),
            None => Ok(num_cpus::get().max(1)),
        }
    }

    /// Seed for worker `index`
    pub fn worker_seed(&self, index: usize) -> Option<u64> {
        self.base_seed
            .or(self.session.seed)
            .map(|seed| seed.wrapping_add(index as u64))
    }

    pub fn validate(&self) -> SimResult<()> {
        self.session.validate()?;
        self.worker_count()?;
        Ok(())
    }
}
