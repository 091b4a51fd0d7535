//! Progress aggregation across workers

use std::sync::atomic::{AtomicU64, Ordering};

use lm_slot::Progress;
use parking_lot::Mutex;

/// Sums completed spins from every worker and reports each crossed tenth
/// of the run exactly once, in order.
pub struct ProgressTracker<'a> {
    total: u64,
    completed: AtomicU64,
    reported: Mutex<u64>,
    callback: &'a (dyn Fn(Progress) + Sync),
}

impl<'a> ProgressTracker<'a> {
    pub fn new(total: u64, callback: &'a (dyn Fn(Progress) + Sync)) -> Self {
        Self {
            total,
            completed: AtomicU64::new(0),
            reported: Mutex::new(0),
            callback,
        }
    }

    /// Spins finished so far
    pub fn completed(&self) -> u64 {
        self.completed.load(Ordering::Relaxed)
    }

    fn at(&self, completed: u64) -> Progress {
        Progress {
            completed,
            total: self.total,
        }
    }

    /// Record `spins` more finished spins
    pub fn add(&self, spins: u64) {
        if spins == 0 || self.total == 0 {
            return;
        }
        let before = self.completed.fetch_add(spins, Ordering::Relaxed);
        let after = before.saturating_add(spins);
        if self.at(after).tenths() == self.at(before).tenths() {
            return;
        }

        let mut reported = self.reported.lock();
        let tenths = self.at(self.completed()).tenths();
        while *reported < tenths {
            *reported += 1;
            (self.callback)(Progress::at_tenth(*reported, self.total));
        }
    }
}
