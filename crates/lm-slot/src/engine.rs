//! Game session: spin cycle, bulk play and metrics

use std::fmt;

use serde::Serialize;

use crate::config::SessionConfig;
use crate::error::{SlotError, SlotResult};
use crate::evaluator::{Evaluation, evaluate};
use crate::paylines::ActivePaylines;
use crate::paytable::Paytable;
use crate::reels::{ReelLayout, ReelSet};
use crate::rng::{RandomSource, SessionRng, session_rng};
use crate::spin::{Gameboard, Stops, spin_into};
use crate::stats::SpinStats;

/// Payback of the reference layout on one payline (%)
pub const REFERENCE_PAYBACK: f64 = 96.25;
/// Hit frequency of the reference layout on one payline (%)
pub const REFERENCE_HIT_FREQUENCY: f64 = 5.15;

/// Bulk run progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub completed: u64,
    pub total: u64,
}

impl Progress {
    /// Completed tenths, capped at 10
    pub fn tenths(&self) -> u64 {
        if self.total == 0 {
            return 10;
        }
        let tenths = u128::from(self.completed) * 10 / u128::from(self.total);
        tenths.min(10) as u64
    }

    /// Spins completed at the end of tenth `tenth` of a `total`-spin run
    pub fn at_tenth(tenth: u64, total: u64) -> Self {
        let completed = u128::from(tenth.min(10)) * u128::from(total) / 10;
        Self {
            completed: completed as u64,
            total,
        }
    }
}

/// Spins between progress callbacks: a tenth of the run, rounded up
pub fn progress_step(total: u64) -> u64 {
    total.div_ceil(10).max(1)
}

/// Result of one spin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SpinOutcome {
    pub board: Gameboard,
    pub stops: Stops,
    pub evaluation: Evaluation,
    /// Credits wagered on the spin (bet per line × active paylines)
    pub bet: u64,
}

impl SpinOutcome {
    #[inline]
    pub fn win(&self) -> u64 {
        self.evaluation.total()
    }
}

/// Observed metrics against the reference figures
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricsReport {
    pub stats: SpinStats,
    pub expected_payback: f64,
    pub expected_hit_frequency: f64,
}

impl MetricsReport {
    pub fn payback(&self) -> f64 {
        self.stats.payback_percentage()
    }

    pub fn hit_frequency(&self) -> f64 {
        self.stats.hit_frequency()
    }

    /// Observed minus expected payback
    pub fn payback_difference(&self) -> f64 {
        self.payback() - self.expected_payback
    }

    /// Observed minus expected hit frequency
    pub fn hit_frequency_difference(&self) -> f64 {
        self.hit_frequency() - self.expected_hit_frequency
    }
}

impl fmt::Display for MetricsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<16}{:>12}{:>12}{:>12}", "", "Observed", "Expected", "Diff")?;
        writeln!(
            f,
            "{:<16}{:>11.4}%{:>11.4}%{:>+12.4}",
            "Payback",
            self.payback(),
            self.expected_payback,
            self.payback_difference()
        )?;
        write!(
            f,
            "{:<16}{:>11.4}%{:>11.4}%{:>+12.4}",
            "Hit frequency",
            self.hit_frequency(),
            self.expected_hit_frequency,
            self.hit_frequency_difference()
        )
    }
}

/// A single-player session.
///
/// Owns its reels, paytable and generator; nothing is shared between
/// sessions. Game stats cover the current displayed game, session stats
/// everything since construction.
pub struct GameSession<R = SessionRng> {
    config: SessionConfig,
    reels: ReelSet,
    paytable: Paytable,
    rng: R,
    active: ActivePaylines,
    board: Gameboard,
    game_stats: SpinStats,
    session_stats: SpinStats,
}

impl GameSession<SessionRng> {
    /// Build a session seeded from `config.seed` (or the OS)
    pub fn new(config: SessionConfig) -> SlotResult<Self> {
        let rng = session_rng(config.seed);
        Self::with_rng(config, rng)
    }
}

impl<R: RandomSource> GameSession<R> {
    /// Build a session around an existing generator
    pub fn with_rng(config: SessionConfig, mut rng: R) -> SlotResult<Self> {
        config.validate()?;
        let active = config.active()?;
        let reels = config.reel_set(&mut rng)?;

        log::debug!(
            "New session: {:?} layout {:?}, {} paylines, bet {}",
            reels.layout(),
            reels.lengths(),
            active.get(),
            config.bet_per_line
        );

        Ok(Self {
            config,
            reels,
            paytable: Paytable::reference(),
            rng,
            active,
            board: Gameboard::default(),
            game_stats: SpinStats::default(),
            session_stats: SpinStats::default(),
        })
    }

    /// Replace the paytable
    pub fn with_paytable(mut self, paytable: Paytable) -> Self {
        self.paytable = paytable;
        self
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // CONFIGURATION
    // ═══════════════════════════════════════════════════════════════════════════

    /// Change the active payline count (1..=15)
    pub fn set_active_paylines(&mut self, count: u8) -> SlotResult<()> {
        self.active = ActivePaylines::new(count)?;
        self.config.active_paylines = count;
        log::debug!("Active paylines set to {count}");
        Ok(())
    }

    pub fn active_paylines(&self) -> ActivePaylines {
        self.active
    }

    pub fn bet_per_line(&self) -> u32 {
        self.config.bet_per_line
    }

    /// Credits wagered per spin
    #[inline]
    pub fn bet_per_spin(&self) -> u64 {
        u64::from(self.config.bet_per_line) * u64::from(self.active.get())
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn reels(&self) -> &ReelSet {
        &self.reels
    }

    pub fn paytable(&self) -> &Paytable {
        &self.paytable
    }

    /// Board from the most recent spin
    pub fn board(&self) -> &Gameboard {
        &self.board
    }

    pub fn game_stats(&self) -> &SpinStats {
        &self.game_stats
    }

    pub fn session_stats(&self) -> &SpinStats {
        &self.session_stats
    }

    /// Start a new displayed game
    pub fn reset_game_stats(&mut self) {
        self.game_stats.reset();
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // SPIN EXECUTION
    // ═══════════════════════════════════════════════════════════════════════════

    #[inline]
    fn spin_cycle(&mut self) -> (Stops, Evaluation) {
        let stops = spin_into(&self.reels, &mut self.rng, &mut self.board);
        let evaluation = evaluate(
            &self.board,
            self.active,
            self.config.bet_per_line,
            &self.paytable,
        );
        let bet = self.bet_per_spin();
        self.game_stats.record_spin(bet, evaluation.total());
        self.session_stats.record_spin(bet, evaluation.total());
        (stops, evaluation)
    }

    /// Spin once, updating game and session stats
    pub fn spin(&mut self) -> SpinOutcome {
        let (stops, evaluation) = self.spin_cycle();
        SpinOutcome {
            board: self.board,
            stops,
            evaluation,
            bet: self.bet_per_spin(),
        }
    }

    /// Play `spins` games back to back.
    ///
    /// Each spin is its own game. `progress` is called every
    /// [`progress_step`] spins. Returns the stats of this run alone.
    pub fn play<F>(&mut self, spins: u64, mut progress: F) -> SpinStats
    where
        F: FnMut(Progress),
    {
        log::info!("Playing {} spins on {} paylines", spins, self.active.get());

        let step = progress_step(spins);
        let mut run = SpinStats::default();
        let bet = self.bet_per_spin();

        for completed in 1..=spins {
            self.reset_game_stats();
            let (_, evaluation) = self.spin_cycle();
            run.record_spin(bet, evaluation.total());

            if completed % step == 0 {
                progress(Progress {
                    completed,
                    total: spins,
                });
            }
        }

        log::info!(
            "Finished {} spins: payback {:.4}%, hit frequency {:.4}%",
            run.spins,
            run.payback_percentage(),
            run.hit_frequency()
        );
        run
    }

    /// Measure payback and hit frequency on one payline and compare them
    /// with the reference figures.
    ///
    /// Only meaningful on the reference layout. The active payline count
    /// is restored afterwards; the run is counted in the session stats.
    pub fn test_metrics<F>(&mut self, spins: u64, progress: F) -> SlotResult<MetricsReport>
    where
        F: FnMut(Progress),
    {
        if self.reels.layout() != ReelLayout::Reference {
            return Err(SlotError::LayoutMismatch {
                expected: ReelLayout::Reference,
                actual: self.reels.layout(),
            });
        }

        let saved = self.active;
        self.active = ActivePaylines::default();
        let stats = self.play(spins, progress);
        self.active = saved;

        Ok(MetricsReport {
            stats,
            expected_payback: REFERENCE_PAYBACK,
            expected_hit_frequency: REFERENCE_HIT_FREQUENCY,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedSource;
    use crate::symbols::Symbol;

    fn seeded(paylines: u8, seed: u64) -> GameSession {
        GameSession::new(SessionConfig::reference(paylines, Some(seed))).unwrap()
    }

    #[test]
    fn test_session_creation() {
        let session = seeded(1, 1);
        assert_eq!(session.session_stats().spins, 0);
        assert_eq!(session.session_stats().payback_percentage(), 0.0);
        assert_eq!(session.session_stats().hit_frequency(), 0.0);
        assert_eq!(session.reels().layout(), ReelLayout::Reference);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = SessionConfig::reference(16, None);
        assert_eq!(
            GameSession::new(config).err(),
            Some(SlotError::InvalidPaylineCount(16))
        );
    }

    #[test]
    fn test_total_bet_is_spins_times_lines() {
        for paylines in [1u8, 7, 15] {
            let mut session = seeded(paylines, 5);
            let run = session.play(1000, |_| {});
            assert_eq!(run.spins, 1000);
            assert_eq!(run.total_bet, 1000 * u128::from(paylines));
            assert_eq!(session.session_stats().total_bet, run.total_bet);
        }
    }

    #[test]
    fn test_same_seed_same_results() {
        let mut a = seeded(15, 77);
        let mut b = seeded(15, 77);
        for _ in 0..500 {
            assert_eq!(a.spin(), b.spin());
        }
        assert_eq!(a.session_stats(), b.session_stats());
    }

    #[test]
    fn test_reset_game_stats() {
        let mut session = seeded(3, 9);
        for _ in 0..10 {
            session.spin();
        }
        assert_eq!(session.game_stats().spins, 10);

        session.reset_game_stats();
        let once = *session.game_stats();
        session.reset_game_stats();
        assert_eq!(*session.game_stats(), once);
        assert_eq!(once, SpinStats::default());
        assert_eq!(session.session_stats().spins, 10);
    }

    #[test]
    fn test_set_active_paylines() {
        let mut session = seeded(1, 3);
        assert_eq!(
            session.set_active_paylines(0),
            Err(SlotError::InvalidPaylineCount(0))
        );
        assert_eq!(
            session.set_active_paylines(16),
            Err(SlotError::InvalidPaylineCount(16))
        );
        assert_eq!(session.active_paylines().get(), 1);

        session.set_active_paylines(9).unwrap();
        assert_eq!(session.bet_per_spin(), 9);
        assert_eq!(session.spin().bet, 9);
    }

    #[test]
    fn test_progress_calls() {
        let mut session = seeded(1, 11);
        let mut seen = Vec::new();
        session.play(100, |p| seen.push(p.completed));
        assert_eq!(seen, vec![10, 20, 30, 40, 50, 60, 70, 80, 90, 100]);

        let mut calls = 0;
        session.play(15, |_| calls += 1);
        assert_eq!(calls, 7);

        let mut calls = 0;
        session.play(0, |_| calls += 1);
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_progress_tenths() {
        assert_eq!(Progress { completed: 0, total: 50 }.tenths(), 0);
        assert_eq!(Progress { completed: 25, total: 50 }.tenths(), 5);
        assert_eq!(Progress { completed: 50, total: 50 }.tenths(), 10);
        assert_eq!(Progress { completed: 80, total: 50 }.tenths(), 10);
        assert_eq!(progress_step(15), 2);
        assert_eq!(progress_step(0), 1);
    }

    #[test]
    fn test_progress_near_u64_max() {
        let total = u64::MAX;
        let half = Progress { completed: total / 2, total };
        assert_eq!(half.tenths(), 4);
        assert_eq!(Progress { completed: total, total }.tenths(), 10);
        assert_eq!(Progress::at_tenth(10, total).completed, total);
        assert_eq!(Progress::at_tenth(5, total).completed, total / 2);
        assert_eq!(Progress::at_tenth(1, 7).completed, 0);
        assert_eq!(progress_step(total), total.div_ceil(10));
    }

    #[test]
    fn test_scripted_jackpot() {
        // Lobster on the middle row of every reel
        let rng = ScriptedSource::new(vec![10, 2, 13, 34, 35]);
        let mut session = GameSession::with_rng(SessionConfig::default(), rng).unwrap();
        let outcome = session.spin();

        assert_eq!(outcome.stops, [10, 2, 13, 34, 35]);
        for reel in 0..5 {
            assert_eq!(outcome.board.get(reel, 1), Symbol::Lobster);
        }
        assert_eq!(outcome.win(), 10_000);
        assert_eq!(session.session_stats().hits, 1);
    }

    #[test]
    fn test_metrics_requires_reference_layout() {
        let config = SessionConfig {
            layout: ReelLayout::Shuffled,
            seed: Some(4),
            ..SessionConfig::default()
        };
        let mut session = GameSession::new(config).unwrap();
        assert_eq!(
            session.test_metrics(10, |_| {}).err(),
            Some(SlotError::LayoutMismatch {
                expected: ReelLayout::Reference,
                actual: ReelLayout::Shuffled,
            })
        );
    }

    #[test]
    fn test_metrics_restores_paylines() {
        let mut session = seeded(15, 8);
        let report = session.test_metrics(1000, |_| {}).unwrap();
        assert_eq!(report.stats.spins, 1000);
        assert_eq!(report.stats.total_bet, 1000);
        assert_eq!(session.active_paylines().get(), 15);
        assert_eq!(report.expected_payback, REFERENCE_PAYBACK);
    }
}
