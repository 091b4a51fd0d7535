//! Spin engine: stop selection and the visible gameboard

use std::fmt;

use serde::Serialize;

use crate::reels::{REEL_COUNT, ReelSet};
use crate::rng::RandomSource;
use crate::symbols::Symbol;

/// Visible rows per reel
pub const ROW_COUNT: usize = 3;

/// Stop index drawn for each reel
pub type Stops = [usize; REEL_COUNT];

/// The 5×3 window of visible symbols.
///
/// Stored column-major (`cells[reel][row]`), row 0 is the top row.
/// Plain `Copy` data so a spin never touches the heap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Gameboard {
    cells: [[Symbol; ROW_COUNT]; REEL_COUNT],
}

impl Gameboard {
    /// Board built from explicit columns
    pub fn from_columns(cells: [[Symbol; ROW_COUNT]; REEL_COUNT]) -> Self {
        Self { cells }
    }

    /// Board built from rows (top, middle, bottom), handy for tests
    pub fn from_rows(rows: [[Symbol; REEL_COUNT]; ROW_COUNT]) -> Self {
        let mut cells = [[Symbol::Wild; ROW_COUNT]; REEL_COUNT];
        for (row, line) in rows.iter().enumerate() {
            for (reel, &symbol) in line.iter().enumerate() {
                cells[reel][row] = symbol;
            }
        }
        Self { cells }
    }

    #[inline]
    pub fn get(&self, reel: usize, row: usize) -> Symbol {
        self.cells[reel][row]
    }

    /// Visible symbols of one reel, top to bottom
    #[inline]
    pub fn column(&self, reel: usize) -> &[Symbol; ROW_COUNT] {
        &self.cells[reel]
    }

    /// Occurrences of a symbol anywhere on the board
    pub fn count(&self, symbol: Symbol) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&s| s == symbol)
            .count()
    }

    /// Overwrite the board from reel stops
    #[inline]
    pub fn fill(&mut self, reels: &ReelSet, stops: &Stops) {
        for (reel, column) in self.cells.iter_mut().enumerate() {
            let strip = reels.strip(reel);
            for (row, cell) in column.iter_mut().enumerate() {
                *cell = strip.symbol_at(stops[reel] + row);
            }
        }
    }
}

impl Default for Gameboard {
    fn default() -> Self {
        Self {
            cells: [[Symbol::Wild; ROW_COUNT]; REEL_COUNT],
        }
    }
}

impl fmt::Display for Gameboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..ROW_COUNT {
            for reel in 0..REEL_COUNT {
                if reel > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{}", self.cells[reel][row])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Draw one stop per reel, in reel order
#[inline]
pub fn draw_stops<R: RandomSource + ?Sized>(reels: &ReelSet, rng: &mut R) -> Stops {
    let mut stops = [0; REEL_COUNT];
    for (reel, stop) in stops.iter_mut().enumerate() {
        *stop = rng.draw(0..reels.strip(reel).len());
    }
    stops
}

/// Spin into a caller-owned board, returning the stops
#[inline]
pub fn spin_into<R: RandomSource + ?Sized>(
    reels: &ReelSet,
    rng: &mut R,
    board: &mut Gameboard,
) -> Stops {
    let stops = draw_stops(reels, rng);
    board.fill(reels, &stops);
    stops
}

/// Spin and return a fresh board
pub fn spin<R: RandomSource + ?Sized>(reels: &ReelSet, rng: &mut R) -> (Gameboard, Stops) {
    let mut board = Gameboard::default();
    let stops = spin_into(reels, rng, &mut board);
    (board, stops)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{ScriptedSource, session_rng};

    #[test]
    fn test_stops_in_range() {
        let mut rng = session_rng(Some(99));
        let reels = ReelSet::reference();
        let lengths = reels.lengths();
        for _ in 0..10_000 {
            let stops = draw_stops(&reels, &mut rng);
            for (stop, len) in stops.iter().zip(lengths) {
                assert!(*stop < len);
            }
        }
    }

    #[test]
    fn test_window_wraps() {
        let reels = ReelSet::reference();
        // Last stop on every reel
        let stops: Stops = [46, 45, 47, 49, 49];
        let mut rng = ScriptedSource::new(stops.to_vec());
        let (board, drawn) = spin(&reels, &mut rng);
        assert_eq!(drawn, stops);

        for reel in 0..REEL_COUNT {
            let strip = reels.strip(reel).symbols();
            let len = strip.len();
            assert_eq!(board.get(reel, 0), strip[len - 1]);
            assert_eq!(board.get(reel, 1), strip[0]);
            assert_eq!(board.get(reel, 2), strip[1]);
        }
    }

    #[test]
    fn test_one_draw_per_reel() {
        let reels = ReelSet::reference();
        let mut rng = ScriptedSource::new(vec![0, 1, 2, 3, 4]);
        let mut board = Gameboard::default();
        spin_into(&reels, &mut rng, &mut board);
        assert_eq!(rng.draws(), REEL_COUNT);
        assert_eq!(board.get(0, 0), Symbol::Tuna);
        assert_eq!(board.get(1, 0), Symbol::Wild);
    }

    #[test]
    fn test_same_seed_same_boards() {
        let reels = ReelSet::reference();
        let mut a = session_rng(Some(2024));
        let mut b = session_rng(Some(2024));
        for _ in 0..1000 {
            assert_eq!(spin(&reels, &mut a), spin(&reels, &mut b));
        }
    }

    #[test]
    fn test_from_rows_layout() {
        use Symbol::*;
        let board = Gameboard::from_rows([
            [Tuna, Clam, Buoy, Boat, Seagull],
            [Wild, Wild, Wild, Wild, Wild],
            [Scatter, Tuna, Tuna, Tuna, Scatter],
        ]);
        assert_eq!(board.get(2, 0), Buoy);
        assert_eq!(board.column(4), &[Seagull, Wild, Scatter]);
        assert_eq!(board.count(Scatter), 2);
        assert_eq!(board.count(Wild), 5);
    }

    #[test]
    fn test_display() {
        use Symbol::*;
        let board = Gameboard::from_rows([
            [Tuna, Clam, Buoy, Boat, Seagull],
            [Wild, Lobster, Wild, Lobster, Wild],
            [Scatter, Tuna, Tuna, Tuna, Scatter],
        ]);
        assert_eq!(
            board.to_string(),
            "TU CL BU BO SG\nWS LM WS LM WS\nFS TU TU TU FS\n"
        );
    }
}
