//! Paytable lookup

use serde::{Deserialize, Serialize};

use crate::reels::REEL_COUNT;
use crate::spin::ROW_COUNT;
use crate::symbols::{SYMBOL_COUNT, Symbol};

/// Highest scatter count a board can show
pub const MAX_SCATTERS: usize = REEL_COUNT * ROW_COUNT;

/// Line and scatter pays.
///
/// Line pays are credits per credit bet on the line, indexed by
/// `[symbol][match length]` for lengths 0..=5. Scatter pays multiply the
/// bet per line, are paid once per board and are indexed by the number of
/// scatters on the board.
/// A zero entry is an ordinary miss.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paytable {
    line: [[u32; REEL_COUNT + 1]; SYMBOL_COUNT],
    scatter: [u32; MAX_SCATTERS + 1],
}

impl Paytable {
    /// The reference paytable
    pub fn reference() -> Self {
        let mut line = [[0; REEL_COUNT + 1]; SYMBOL_COUNT];
        // match lengths 0..=5
        line[Symbol::Lobster.index()] = [0, 0, 5, 200, 1000, 10000];
        line[Symbol::Buoy.index()] = [0, 0, 2, 100, 400, 1000];
        line[Symbol::Boat.index()] = [0, 0, 1, 50, 182, 500];
        line[Symbol::Lighthouse.index()] = [0, 0, 0, 40, 150, 400];
        line[Symbol::Tuna.index()] = [0, 0, 0, 25, 100, 250];
        line[Symbol::Clam.index()] = [0, 0, 0, 20, 75, 200];
        line[Symbol::Seagull.index()] = [0, 0, 0, 15, 50, 150];
        line[Symbol::Starfish.index()] = [0, 0, 0, 8, 40, 100];
        line[Symbol::Bonus.index()] = [0, 0, 0, 40, 40, 40];

        let mut scatter = [200; MAX_SCATTERS + 1];
        scatter[0] = 0;
        scatter[1] = 0;
        scatter[2] = 0;
        scatter[3] = 5;
        scatter[4] = 25;

        Self { line, scatter }
    }

    /// Build from raw tables
    pub fn new(
        line: [[u32; REEL_COUNT + 1]; SYMBOL_COUNT],
        scatter: [u32; MAX_SCATTERS + 1],
    ) -> Self {
        Self { line, scatter }
    }

    /// Line pay for `length` consecutive matches of `symbol`
    #[inline]
    pub fn line_pay(&self, symbol: Symbol, length: usize) -> u32 {
        self.line[symbol.index()][length]
    }

    /// Scatter multiplier for `count` scatters on the board
    #[inline]
    pub fn scatter_pay(&self, count: usize) -> u32 {
        self.scatter[count.min(MAX_SCATTERS)]
    }

    /// Symbol with the highest five-of-a-kind pay (lowest id on ties).
    ///
    /// An all-wild payline pays as this symbol.
    pub fn top_symbol(&self) -> Symbol {
        let mut best = Symbol::Lobster;
        let mut best_pay = 0;
        for symbol in Symbol::ALL {
            if symbol.is_wild() || symbol.is_scatter() {
                continue;
            }
            let pay = self.line_pay(symbol, REEL_COUNT);
            if pay > best_pay {
                best = symbol;
                best_pay = pay;
            }
        }
        best
    }

    /// Full line row for a symbol
    pub fn line_row(&self, symbol: Symbol) -> &[u32; REEL_COUNT + 1] {
        &self.line[symbol.index()]
    }

    pub fn scatter_row(&self) -> &[u32; MAX_SCATTERS + 1] {
        &self.scatter
    }
}

impl Default for Paytable {
    fn default() -> Self {
        Self::reference()
    }
}
