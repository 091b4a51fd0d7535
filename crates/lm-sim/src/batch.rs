//! Parallel batch runs

use std::fmt;
use std::time::Instant;

use lm_slot::{GameSession, Progress, ReelLayout, SessionConfig, SpinStats, session_rng};
use rayon::prelude::*;
use serde::Serialize;

use crate::config::BatchConfig;
use crate::error::{SimError, SimResult};
use crate::progress::ProgressTracker;

/// Merged result of a batch
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchReport {
    pub layout: ReelLayout,
    pub active_paylines: u8,
    pub bet_per_line: u32,
    pub workers: usize,
    /// Totals across all workers
    pub stats: SpinStats,
    /// Per-worker totals, in worker order
    pub worker_stats: Vec<SpinStats>,
    pub elapsed_secs: f64,
}

impl BatchReport {
    pub fn payback_percentage(&self) -> f64 {
        self.stats.payback_percentage()
    }

    pub fn hit_frequency(&self) -> f64 {
        self.stats.hit_frequency()
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.stats.report(self.active_paylines))?;
        write!(
            f,
            "  Workers:        {} ({:?} layout)",
            self.workers, self.layout
        )
    }
}

/// Split `total` spins over `workers`: even shares, the first
/// `total % workers` workers take one extra
pub fn partition(total: u64, workers: usize) -> Vec<u64> {
    if workers == 0 {
        return Vec::new();
    }
    let n = workers as u64;
    let base = total / n;
    let extra = total % n;
    (0..n).map(|i| base + u64::from(i < extra)).collect()
}

/// Run a batch on a rayon pool, one session per worker.
///
/// A shuffled layout is shuffled once, from the base seed, and shared by
/// every worker. `progress` fires at each tenth of the whole batch.
pub fn run_batch(
    config: &BatchConfig,
    progress: &(dyn Fn(Progress) + Sync),
) -> SimResult<BatchReport> {
    config.validate()?;
    let workers = config.worker_count()?;
    let shares = partition(config.total_spins, workers);
    let session = worker_template(config)?;

    log::debug!(
        "Batch of {} spins over {} workers: {:?}",
        config.total_spins,
        workers,
        shares
    );

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()
        .map_err(|e| SimError::ThreadPool(e.to_string()))?;

    let tracker = ProgressTracker::new(config.total_spins, progress);
    let started = Instant::now();

    let results: Vec<SimResult<SpinStats>> = pool.install(|| {
        shares
            .par_iter()
            .enumerate()
            .map(|(index, &spins)| {
                let mut worker = session.clone();
                worker.seed = config.worker_seed(index);
                run_worker(worker, spins, &tracker)
            })
            .collect()
    });

    let worker_stats = results.into_iter().collect::<SimResult<Vec<_>>>()?;
    let mut stats = SpinStats::default();
    for s in &worker_stats {
        stats.merge(s);
    }

    let report = BatchReport {
        layout: config.session.layout,
        active_paylines: config.session.active_paylines,
        bet_per_line: config.session.bet_per_line,
        workers,
        stats,
        worker_stats,
        elapsed_secs: started.elapsed().as_secs_f64(),
    };

    log::info!(
        "Batch finished: {} spins, payback {:.4}%, hit frequency {:.4}% in {:.2}s",
        report.stats.spins,
        report.payback_percentage(),
        report.hit_frequency(),
        report.elapsed_secs
    );
    Ok(report)
}

/// Session settings every worker starts from
fn worker_template(config: &BatchConfig) -> SimResult<SessionConfig> {
    let mut session = config.session.clone();
    if session.layout == ReelLayout::Shuffled {
        let mut rng = session_rng(config.worker_seed(0));
        let reels = session.reel_set(&mut rng)?;
        session.layout = ReelLayout::Custom;
        session.strips = Some(
            reels
                .strips()
                .iter()
                .map(|strip| strip.symbols().to_vec())
                .collect(),
        );
    }
    Ok(session)
}

fn run_worker(
    config: SessionConfig,
    spins: u64,
    tracker: &ProgressTracker<'_>,
) -> SimResult<SpinStats> {
    let mut session = GameSession::new(config)?;
    let mut reported = 0;
    let stats = session.play(spins, |p| {
        tracker.add(p.completed - reported);
        reported = p.completed;
    });
    tracker.add(spins - reported);
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    fn quiet(_: Progress) {}

    #[test]
    fn test_partition() {
        assert_eq!(partition(10, 3), vec![4, 3, 3]);
        assert_eq!(partition(9, 3), vec![3, 3, 3]);
        assert_eq!(partition(2, 4), vec![1, 1, 0, 0]);
        assert_eq!(partition(0, 2), vec![0, 0]);
        assert!(partition(5, 0).is_empty());
        for workers in 1..20 {
            assert_eq!(partition(1_000_003, workers).iter().sum::<u64>(), 1_000_003);
        }
    }

    #[test]
    fn test_no_workers() {
        let config = BatchConfig::new(SessionConfig::default(), 100).with_workers(0);
        assert!(matches!(run_batch(&config, &quiet), Err(SimError::NoWorkers)));
    }

    #[test]
    fn test_merged_equals_sum() {
        let config = BatchConfig::new(SessionConfig::reference(9, None), 10_001)
            .with_workers(4)
            .with_base_seed(7);
        let report = run_batch(&config, &quiet).unwrap();

        assert_eq!(report.worker_stats.len(), 4);
        let mut sum = SpinStats::default();
        for s in &report.worker_stats {
            sum.merge(s);
        }
        assert_eq!(report.stats, sum);
        assert_eq!(report.stats.spins, 10_001);
        assert_eq!(report.stats.total_bet, 10_001 * 9);
        assert_eq!(report.worker_stats[0].spins, 2501);
    }

    #[test]
    fn test_worker_matches_standalone_session() {
        let config = BatchConfig::new(SessionConfig::reference(15, None), 3000)
            .with_workers(3)
            .with_base_seed(100);
        let report = run_batch(&config, &quiet).unwrap();

        let mut session = GameSession::new(SessionConfig::reference(15, Some(101))).unwrap();
        let standalone = session.play(1000, |_| {});
        assert_eq!(report.worker_stats[1], standalone);
    }

    #[test]
    fn test_seeded_batches_repeat() {
        let config = BatchConfig::new(SessionConfig::reference(5, None), 20_000)
            .with_workers(3)
            .with_base_seed(55);
        let a = run_batch(&config, &quiet).unwrap();
        let b = run_batch(&config, &quiet).unwrap();
        assert_eq!(a.worker_stats, b.worker_stats);
    }

    #[test]
    fn test_progress_tenths() {
        let seen = Mutex::new(Vec::new());
        let callback = |p: Progress| seen.lock().push(p.completed);
        let config = BatchConfig::new(SessionConfig::default(), 1234)
            .with_workers(5)
            .with_base_seed(1);
        run_batch(&config, &callback).unwrap();

        let seen = seen.lock();
        assert_eq!(seen.len(), 10);
        assert!(seen.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(seen.last(), Some(&1234));
    }

    #[test]
    fn test_shuffled_batch_shares_reels() {
        let mut session = SessionConfig::reference(1, None);
        session.layout = ReelLayout::Shuffled;
        let config = BatchConfig::new(session, 100).with_base_seed(3);

        let template = worker_template(&config).unwrap();
        assert_eq!(template.layout, ReelLayout::Custom);
        assert_eq!(template, worker_template(&config).unwrap());

        let report = run_batch(&config.clone().with_workers(2), &quiet).unwrap();
        assert_eq!(report.layout, ReelLayout::Shuffled);
        assert_eq!(report.stats.spins, 100);
    }
}
