//! Exact payback analysis.
//!
//! Enumerates every stop combination of a reel set for a single payline at
//! bet 1, without spinning. Each reel is reduced to a table of
//! (symbol on the payline row, scatters in the window) → stop count, and the
//! symbol combinations are walked with the scatter distributions convolved
//! along the way. All arithmetic is integer.

use std::fmt;

use serde::Serialize;

use crate::evaluator::{MIN_SCATTERS, match_line};
use crate::paylines::Payline;
use crate::paytable::{MAX_SCATTERS, Paytable};
use crate::reels::{REEL_COUNT, ReelSet};
use crate::spin::ROW_COUNT;
use crate::stats::group_digits;
use crate::symbols::{SYMBOL_COUNT, Symbol};

/// Stop counts per (symbol, scatters in window) for one reel
type ReelTable = [[u128; ROW_COUNT + 1]; SYMBOL_COUNT];

/// Scatter count distribution across a prefix of reels
type ScatterDist = [u128; MAX_SCATTERS + 1];

/// Exact single-payline figures for a reel set
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParSheet {
    /// Payline index (0-based)
    pub payline: u8,
    /// All stop combinations
    pub combinations: u128,
    /// Credits paid over all combinations at bet 1
    pub total_payout: u128,
    /// Combinations that pay anything
    pub winning_combinations: u128,
    /// Combinations paying the top five-of-a-kind
    pub jackpot_combinations: u128,
    /// Line payout per symbol, indexed by symbol id
    pub line_payout: [u128; SYMBOL_COUNT],
    /// Payout from scatters
    pub scatter_payout: u128,
}

impl ParSheet {
    /// Analyse `payline` on `reels`
    pub fn for_payline(reels: &ReelSet, paytable: &Paytable, payline: &Payline) -> Self {
        let tables: Vec<ReelTable> = payline
            .cells()
            .map(|(reel, row)| reel_table(reels, reel, row))
            .collect();

        let mut sheet = Self {
            payline: payline.index,
            combinations: reels.total_combinations(),
            total_payout: 0,
            winning_combinations: 0,
            jackpot_combinations: 0,
            line_payout: [0; SYMBOL_COUNT],
            scatter_payout: 0,
        };

        let mut dist = [0u128; MAX_SCATTERS + 1];
        dist[0] = 1;
        let mut symbols = [Symbol::Wild; REEL_COUNT];
        let top = paytable.top_symbol();
        sheet.walk(&tables, paytable, top, 0, &mut symbols, &dist);

        log::debug!(
            "Par sheet for payline {}: {} / {} credits, {} hits",
            payline.number(),
            sheet.total_payout,
            sheet.combinations,
            sheet.winning_combinations
        );
        sheet
    }

    fn walk(
        &mut self,
        tables: &[ReelTable],
        paytable: &Paytable,
        top: Symbol,
        reel: usize,
        symbols: &mut [Symbol; REEL_COUNT],
        dist: &ScatterDist,
    ) {
        if reel == REEL_COUNT {
            self.tally(paytable, top, symbols, dist);
            return;
        }

        for symbol in Symbol::ALL {
            let row = &tables[reel][symbol.index()];
            if row.iter().all(|&c| c == 0) {
                continue;
            }
            let mut next = [0u128; MAX_SCATTERS + 1];
            for (have, &ways) in dist.iter().enumerate() {
                if ways == 0 {
                    continue;
                }
                for (add, &count) in row.iter().enumerate() {
                    let total = (have + add).min(MAX_SCATTERS);
                    next[total] += ways * count;
                }
            }
            symbols[reel] = symbol;
            self.walk(tables, paytable, top, reel + 1, symbols, &next);
        }
    }

    fn tally(
        &mut self,
        paytable: &Paytable,
        top: Symbol,
        symbols: &[Symbol; REEL_COUNT],
        dist: &ScatterDist,
    ) {
        let (symbol, length) = match_line(symbols, top);
        let line = u128::from(paytable.line_pay(symbol, length));
        let ways: u128 = dist.iter().sum();

        if symbol == top && length == REEL_COUNT {
            self.jackpot_combinations += ways;
        }
        self.line_payout[symbol.index()] += line * ways;

        for (count, &ways) in dist.iter().enumerate() {
            if ways == 0 {
                continue;
            }
            let scatter = if count >= MIN_SCATTERS {
                u128::from(paytable.scatter_pay(count))
            } else {
                0
            };
            let pay = line + scatter;
            self.scatter_payout += scatter * ways;
            self.total_payout += pay * ways;
            if pay > 0 {
                self.winning_combinations += ways;
            }
        }
    }

    pub fn payback_percentage(&self) -> f64 {
        if self.combinations == 0 {
            return 0.0;
        }
        self.total_payout as f64 / self.combinations as f64 * 100.0
    }

    pub fn hit_frequency(&self) -> f64 {
        if self.combinations == 0 {
            return 0.0;
        }
        self.winning_combinations as f64 / self.combinations as f64 * 100.0
    }

    /// Average spins between jackpots, if the jackpot can occur
    pub fn spins_per_jackpot(&self) -> Option<u128> {
        if self.jackpot_combinations == 0 {
            None
        } else {
            Some(self.combinations / self.jackpot_combinations)
        }
    }
}

/// Count stops by payline symbol and scatters in the visible window
fn reel_table(reels: &ReelSet, reel: usize, row: usize) -> ReelTable {
    let strip = reels.strip(reel);
    let mut table = [[0u128; ROW_COUNT + 1]; SYMBOL_COUNT];
    for stop in 0..strip.len() {
        let symbol = strip.symbol_at(stop + row);
        let scatters = (0..ROW_COUNT)
            .filter(|&r| strip.symbol_at(stop + r).is_scatter())
            .count();
        table[symbol.index()][scatters] += 1;
    }
    table
}

impl fmt::Display for ParSheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Payline {}", self.payline + 1)?;
        writeln!(f, "  Combinations:   {}", group_digits(self.combinations))?;
        writeln!(f, "  Total payout:   {}", group_digits(self.total_payout))?;
        writeln!(f, "  Winning combos: {}", group_digits(self.winning_combinations))?;
        writeln!(f, "  Payback:        {:.4}%", self.payback_percentage())?;
        writeln!(f, "  Hit frequency:  {:.4}%", self.hit_frequency())?;
        match self.spins_per_jackpot() {
            Some(spins) => writeln!(
                f,
                "  Jackpot:        {} combos, 1 in {}",
                self.jackpot_combinations,
                group_digits(spins)
            )?,
            None => writeln!(f, "  Jackpot:        unreachable")?,
        }
        writeln!(f, "  Payout by symbol:")?;
        for symbol in Symbol::ALL {
            let paid = self.line_payout[symbol.index()];
            if paid > 0 {
                writeln!(f, "    {:<11}{:>14}", symbol.name(), group_digits(paid))?;
            }
        }
        write!(f, "    {:<11}{:>14}", "Scatter", group_digits(self.scatter_payout))
    }
}
