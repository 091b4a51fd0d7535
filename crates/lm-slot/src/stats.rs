//! Spin statistics

use std::fmt;

use serde::{Deserialize, Serialize};

/// Running totals for a sequence of spins, in credits.
///
/// Integer totals keep payback exact at any spin count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpinStats {
    pub spins: u64,
    pub total_bet: u128,
    pub total_win: u128,
    pub hits: u64,
}

impl SpinStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one spin
    #[inline]
    pub fn record_spin(&mut self, bet: u64, win: u64) {
        self.spins += 1;
        self.total_bet += u128::from(bet);
        self.total_win += u128::from(win);
        if win > 0 {
            self.hits += 1;
        }
    }

    /// Total win as a percentage of total bet (0 before any bet)
    pub fn payback_percentage(&self) -> f64 {
        if self.total_bet > 0 {
            (self.total_win as f64 / self.total_bet as f64) * 100.0
        } else {
            0.0
        }
    }

    /// Winning spins as a percentage of spins (0 before any spin)
    pub fn hit_frequency(&self) -> f64 {
        if self.spins > 0 {
            (self.hits as f64 / self.spins as f64) * 100.0
        } else {
            0.0
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Add another accumulator's totals
    pub fn merge(&mut self, other: &SpinStats) {
        self.spins += other.spins;
        self.total_bet += other.total_bet;
        self.total_win += other.total_win;
        self.hits += other.hits;
    }

    /// Session summary for `active` paylines
    pub fn report(&self, active: u8) -> SessionReport<'_> {
        SessionReport {
            stats: self,
            active,
        }
    }

    /// Summary of the current game
    pub fn game_report(&self) -> GameReport<'_> {
        GameReport { stats: self }
    }
}

/// Session summary, see [`SpinStats::report`]
pub struct SessionReport<'a> {
    stats: &'a SpinStats,
    active: u8,
}

impl fmt::Display for SessionReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.stats;
        writeln!(f, "Session stats ({} active paylines)", self.active)?;
        writeln!(f, "  Spins:          {}", group_digits(u128::from(s.spins)))?;
        writeln!(f, "  Total bet:      {}", group_digits(s.total_bet))?;
        writeln!(f, "  Total win:      {}", group_digits(s.total_win))?;
        writeln!(f, "  Winning spins:  {}", group_digits(u128::from(s.hits)))?;
        writeln!(f, "  Payback:        {:.4}%", s.payback_percentage())?;
        write!(f, "  Hit frequency:  {:.4}%", s.hit_frequency())
    }
}

/// Game summary, see [`SpinStats::game_report`]
pub struct GameReport<'a> {
    stats: &'a SpinStats,
}

impl fmt::Display for GameReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.stats;
        write!(
            f,
            "Bet: {}  Win: {}",
            group_digits(s.total_bet),
            group_digits(s.total_win)
        )
    }
}

/// `1234567` -> `"1,234,567"`
pub fn group_digits(value: u128) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
