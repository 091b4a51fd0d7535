//! Payline and scatter evaluation

use serde::Serialize;

use crate::paylines::{ActivePaylines, PAYLINE_COUNT, Payline};
use crate::paytable::Paytable;
use crate::reels::REEL_COUNT;
use crate::spin::Gameboard;
use crate::symbols::Symbol;

/// Fewest scatters that are looked up in the paytable
pub const MIN_SCATTERS: usize = 2;

/// Result of one payline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LineResult {
    /// Payline index (0-based)
    pub payline: u8,
    /// Symbol the run was matched against
    pub symbol: Symbol,
    /// Consecutive matches from reel 0 (wilds included)
    pub length: u8,
    /// Credits won on this line
    pub payout: u64,
}

impl LineResult {
    const fn empty(payline: u8) -> Self {
        Self {
            payline,
            symbol: Symbol::Wild,
            length: 0,
            payout: 0,
        }
    }

    pub fn is_win(&self) -> bool {
        self.payout > 0
    }
}

/// Scatter result for the whole board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ScatterResult {
    /// Scatters anywhere on the board
    pub count: u8,
    /// Credits won (multiplier × bet per line)
    pub payout: u64,
}

/// Outcome of evaluating a board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Evaluation {
    lines: [LineResult; PAYLINE_COUNT],
    active: u8,
    scatter: ScatterResult,
    total: u64,
}

impl Evaluation {
    /// Results for the active paylines, in payline order
    pub fn lines(&self) -> &[LineResult] {
        &self.lines[..self.active as usize]
    }

    /// Paying lines only
    pub fn winning_lines(&self) -> impl Iterator<Item = &LineResult> {
        self.lines().iter().filter(|l| l.is_win())
    }

    pub fn scatter(&self) -> ScatterResult {
        self.scatter
    }

    /// Line wins plus scatter win
    #[inline]
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Sum of line wins
    pub fn line_total(&self) -> u64 {
        self.lines().iter().map(|l| l.payout).sum()
    }

    #[inline]
    pub fn is_hit(&self) -> bool {
        self.total > 0
    }
}

/// Symbols along a payline
#[inline]
pub fn line_symbols(board: &Gameboard, payline: &Payline) -> [Symbol; REEL_COUNT] {
    let mut symbols = [Symbol::Wild; REEL_COUNT];
    for (slot, (reel, row)) in symbols.iter_mut().zip(payline.cells()) {
        *slot = board.get(reel, row);
    }
    symbols
}

/// Reference symbol and run length for the symbols on one line.
///
/// The reference is the first non-wild symbol; a line of five wilds
/// counts as `top`. The run starts at reel 0 and ends at the first symbol
/// that is neither the reference nor wild.
#[inline]
pub fn match_line(symbols: &[Symbol; REEL_COUNT], top: Symbol) -> (Symbol, usize) {
    let reference = symbols
        .iter()
        .copied()
        .find(|s| !s.is_wild())
        .unwrap_or(top);
    let length = symbols
        .iter()
        .take_while(|&&s| s == reference || s.is_wild())
        .count();
    (reference, length)
}

/// Evaluate a board against the active paylines and the scatter pays.
///
/// Line wins pay `line pay × bet_per_line`; the scatter win pays
/// `scatter pay × bet_per_line` once per board, however many lines are active.
pub fn evaluate(
    board: &Gameboard,
    active: ActivePaylines,
    bet_per_line: u32,
    paytable: &Paytable,
) -> Evaluation {
    let bet = u64::from(bet_per_line);
    let mut lines = [LineResult::empty(0); PAYLINE_COUNT];
    let mut total = 0u64;
    let top = paytable.top_symbol();

    for (result, payline) in lines.iter_mut().zip(active.lines()) {
        let symbols = line_symbols(board, payline);
        let (symbol, length) = match_line(&symbols, top);
        let payout = u64::from(paytable.line_pay(symbol, length)) * bet;

        *result = LineResult {
            payline: payline.index,
            symbol,
            length: length as u8,
            payout,
        };
        total += payout;
    }

    let count = board.count(Symbol::Scatter);
    let scatter_payout = if count >= MIN_SCATTERS {
        u64::from(paytable.scatter_pay(count)) * bet
    } else {
        0
    };
    total += scatter_payout;

    for (i, result) in lines.iter_mut().enumerate().skip(active.get() as usize) {
        *result = LineResult::empty(i as u8);
    }

    Evaluation {
        lines,
        active: active.get(),
        scatter: ScatterResult {
            count: count as u8,
            payout: scatter_payout,
        },
        total,
    }
}
