//! Console rendering

use std::fmt::Write as _;
use std::io::{self, Write};

use lm_slot::{LineResult, PAYLINES, SpinOutcome, group_digits, line_symbols};

/// Marks in a full progress bar
pub const PROGRESS_MARKS: usize = 10;

/// Progress bar header
pub fn progress_header(spins: u64) -> String {
    format!(
        "Progress Bar ({} spins)\n\n10%       100%\n|---+----|",
        group_digits(u128::from(spins))
    )
}

/// Marks still missing after `printed` have been shown
pub fn progress_padding(printed: usize) -> String {
    "*".repeat(PROGRESS_MARKS.saturating_sub(printed))
}

/// Print one progress mark immediately
pub fn progress_mark() {
    print!("*");
    let _ = io::stdout().flush();
}

/// One payline as `Payline  3: BU BU BU TU CL  Buoy x3 pays 100`
fn payline_row(outcome: &SpinOutcome, line: &LineResult) -> String {
    let symbols = line_symbols(&outcome.board, &PAYLINES[line.payline as usize]);
    let mut row = format!("Payline {:>2}:", line.payline + 1);
    for symbol in symbols {
        let _ = write!(row, " {symbol}");
    }
    let _ = write!(
        row,
        "  {} x{} pays {}",
        line.symbol.name(),
        line.length,
        group_digits(u128::from(line.payout))
    );
    row
}

/// Board, winning paylines, scatters and total win
pub fn outcome(outcome: &SpinOutcome) -> String {
    let mut out = outcome.board.to_string();
    out.push('\n');

    for line in outcome.evaluation.winning_lines() {
        out.push_str(&payline_row(outcome, line));
        out.push('\n');
    }

    let scatter = outcome.evaluation.scatter();
    if scatter.payout > 0 {
        let _ = writeln!(
            out,
            "Scatter: {} x FS pays {}",
            scatter.count,
            group_digits(u128::from(scatter.payout))
        );
    }
    let _ = write!(
        out,
        "Total win: {}",
        group_digits(u128::from(outcome.win()))
    );
    out
}

/// Every active payline, for the trace file
pub fn trace(outcome: &SpinOutcome) -> String {
    let mut out = format!("Stops {:?}\n{}", outcome.stops, outcome.board);
    for line in outcome.evaluation.lines() {
        out.push_str(&payline_row(outcome, line));
        out.push('\n');
    }
    let scatter = outcome.evaluation.scatter();
    let _ = writeln!(out, "Scatters: {} pays {}", scatter.count, scatter.payout);
    let _ = writeln!(out, "Total win: {}\n", outcome.win());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use lm_slot::{ActivePaylines, Gameboard, Paytable, Symbol, evaluate};

    fn outcome_for(board: Gameboard, lines: u8) -> SpinOutcome {
        let active = ActivePaylines::new(lines).unwrap();
        SpinOutcome {
            board,
            stops: [0; 5],
            evaluation: evaluate(&board, active, 1, &Paytable::reference()),
            bet: u64::from(lines),
        }
    }

    fn buoy_board() -> Gameboard {
        use Symbol::*;
        Gameboard::from_rows([
            [Tuna, Clam, Tuna, Clam, Scatter],
            [Buoy, Buoy, Buoy, Tuna, Clam],
            [Scatter, Clam, Scatter, Clam, Tuna],
        ])
    }

    #[test]
    fn test_progress_padding() {
        assert_eq!(progress_padding(0), "**********");
        assert_eq!(progress_padding(7), "***");
        assert_eq!(progress_padding(10), "");
        assert_eq!(progress_padding(12), "");
        assert!(progress_header(1_000_000).ends_with("10%       100%\n|---+----|"));
    }

    #[test]
    fn test_outcome_lists_wins() {
        let text = outcome(&outcome_for(buoy_board(), 1));
        assert!(text.starts_with("TU CL TU CL FS\n"));
        assert!(text.contains("Payline  1: BU BU BU TU CL  Buoy x3 pays 100"));
        assert!(text.contains("Scatter: 3 x FS pays 5"));
        assert!(text.ends_with("Total win: 105"));
    }

    #[test]
    fn test_trace_lists_every_line() {
        let text = trace(&outcome_for(buoy_board(), 3));
        assert!(text.contains("Payline  1:"));
        assert!(text.contains("Payline  2: TU CL TU CL FS  Tuna x1 pays 0"));
        assert!(text.contains("Payline  3:"));
        assert!(!text.contains("Payline  4:"));
    }
}
