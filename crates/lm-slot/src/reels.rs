//! Reel strips and reel sets

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{SlotError, SlotResult};
use crate::rng::{RandomSource, shuffle};
use crate::symbols::{SYMBOL_COUNT, Symbol};

/// Number of reels on the machine
pub const REEL_COUNT: usize = 5;

const WS: Symbol = Symbol::Wild;
const LM: Symbol = Symbol::Lobster;
const BU: Symbol = Symbol::Buoy;
const BO: Symbol = Symbol::Boat;
const LH: Symbol = Symbol::Lighthouse;
const TU: Symbol = Symbol::Tuna;
const CL: Symbol = Symbol::Clam;
const SG: Symbol = Symbol::Seagull;
const SF: Symbol = Symbol::Starfish;
const LO: Symbol = Symbol::Bonus;
const FS: Symbol = Symbol::Scatter;

#[rustfmt::skip]
const REEL_1: [Symbol; 47] = [
    TU, SG, LO, TU, SF, LH, WS, SF,
    FS, TU, SG, LM, BU, BO, CL, SG,
    SF, BU, LH, SG, BO, TU, SG, SF,
    LH, SF, CL, LH, CL, BO, SF, FS,
    BO, LO, BU, CL, LO, CL, SF, TU,
    LO, TU, SG, LH, CL, SG, SF,
];

#[rustfmt::skip]
const REEL_2: [Symbol; 46] = [
    BU, WS, SG, LM, FS, SG, CL, TU,
    LH, SF, CL, SF, BO, TU, BU, LH,
    SG, SF, LO, SG, CL, LO, CL, SF,
    CL, SG, FS, SG, LH, BU, TU, CL,
    SG, SF, TU, SG, SF, SG, TU, LO,
    SG, LO, LH, TU, SF, LH,
];

#[rustfmt::skip]
const REEL_3: [Symbol; 48] = [
    LH, CL, SF, CL, SG, BO, TU, CL,
    TU, LO, SG, FS, LH, BU, LM, BO,
    LH, SG, CL, BU, SF, LO, SG, LH,
    SF, CL, WS, BU, LO, CL, SF, TU,
    SG, FS, SF, BO, TU, SF, SG, TU,
    LO, LH, SG, SF, BO, SF, TU, CL,
];

#[rustfmt::skip]
const REEL_4: [Symbol; 50] = [
    CL, BU, SF, BO, TU, LH, SG, TU,
    LH, SG, SF, LH, SF, SG, BO, TU,
    SG, SF, BO, SF, CL, FS, SG, CL,
    WS, SF, CL, BU, TU, LH, BO, SG,
    CL, TU, BU, LM, SG, CL, LH, SF,
    BU, TU, FS, SG, LH, BO, SF, CL,
    SF, TU,
];

#[rustfmt::skip]
const REEL_5: [Symbol; 50] = [
    SG, TU, SG, SF, BO, CL, SG, LH,
    WS, TU, SF, LH, SF, TU, BO, BU,
    SF, LH, TU, BO, SF, CL, FS, BO,
    SF, CL, SF, CL, LH, TU, SG, CL,
    BU, SF, TU, CL, LM, SG, BO, CL,
    BU, SG, SF, TU, SG, LH, SG, BU,
    FS, LH,
];

/// Fixed reference strips: 96.25% payback, 5.15% hit frequency on one line
pub const REFERENCE_STRIPS: [&[Symbol]; REEL_COUNT] = [&REEL_1, &REEL_2, &REEL_3, &REEL_4, &REEL_5];

/// How a session lays out its reels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReelLayout {
    /// The fixed reference strips
    #[default]
    Reference,
    /// Reference symbol counts in a freshly shuffled order
    Shuffled,
    /// Strips supplied by the caller
    Custom,
}

/// A reel strip
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReelStrip {
    /// Symbols in order
    symbols: Vec<Symbol>,
    /// Reel index
    reel_index: u8,
}

impl ReelStrip {
    /// Create a strip, rejecting empty ones
    pub fn new(reel_index: u8, symbols: Vec<Symbol>) -> SlotResult<Self> {
        if symbols.is_empty() {
            return Err(SlotError::EmptyReel(reel_index as usize));
        }
        Ok(Self { symbols, reel_index })
    }

    /// Get symbol at position (wraps around)
    #[inline]
    pub fn symbol_at(&self, position: usize) -> Symbol {
        self.symbols[position % self.symbols.len()]
    }

    /// Strip length
    #[inline]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Always false for a constructed strip
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn reel_index(&self) -> u8 {
        self.reel_index
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Occurrences of each symbol, indexed by symbol id
    pub fn symbol_counts(&self) -> [usize; SYMBOL_COUNT] {
        let mut counts = [0; SYMBOL_COUNT];
        for symbol in &self.symbols {
            counts[symbol.index()] += 1;
        }
        counts
    }

    fn shuffle_with<R: RandomSource + ?Sized>(&mut self, rng: &mut R) {
        shuffle(&mut self.symbols, rng);
    }
}

/// Five reel strips, immutable for the life of a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReelSet {
    strips: Vec<ReelStrip>,
    layout: ReelLayout,
}

impl ReelSet {
    /// The fixed reference layout
    pub fn reference() -> Self {
        let strips = REFERENCE_STRIPS
            .iter()
            .enumerate()
            .map(|(i, s)| ReelStrip {
                symbols: s.to_vec(),
                reel_index: i as u8,
            })
            .collect();

        Self {
            strips,
            layout: ReelLayout::Reference,
        }
    }

    /// Reference symbol counts, each reel independently shuffled
    pub fn shuffled<R: RandomSource + ?Sized>(rng: &mut R) -> Self {
        let mut set = Self::reference();
        for strip in &mut set.strips {
            strip.shuffle_with(rng);
        }
        set.layout = ReelLayout::Shuffled;
        log::trace!("Shuffled reel strips: {:?}", set.lengths());
        set
    }

    /// Build the reel set for a layout.
    ///
    /// `Custom` has no strips of its own and is rejected; use
    /// [`ReelSet::from_strips`] for caller-supplied reels.
    pub fn build<R: RandomSource + ?Sized>(layout: ReelLayout, rng: &mut R) -> SlotResult<Self> {
        match layout {
            ReelLayout::Reference => Ok(Self::reference()),
            ReelLayout::Shuffled => Ok(Self::shuffled(rng)),
            ReelLayout::Custom => Err(SlotError::Config(
                "custom layout requires strips".into(),
            )),
        }
    }

    /// Caller-supplied strips, one per reel
    pub fn from_strips(strips: Vec<Vec<Symbol>>) -> SlotResult<Self> {
        if strips.len() != REEL_COUNT {
            return Err(SlotError::ReelCount(strips.len()));
        }
        let strips = strips
            .into_iter()
            .enumerate()
            .map(|(i, symbols)| ReelStrip::new(i as u8, symbols))
            .collect::<SlotResult<Vec<_>>>()?;

        Ok(Self {
            strips,
            layout: ReelLayout::Custom,
        })
    }

    /// Strip for a reel (0..5)
    #[inline]
    pub fn strip(&self, reel: usize) -> &ReelStrip {
        &self.strips[reel]
    }

    pub fn strips(&self) -> &[ReelStrip] {
        &self.strips
    }

    pub fn layout(&self) -> ReelLayout {
        self.layout
    }

    /// Strip lengths in reel order
    pub fn lengths(&self) -> [usize; REEL_COUNT] {
        let mut lengths = [0; REEL_COUNT];
        for (len, strip) in lengths.iter_mut().zip(&self.strips) {
            *len = strip.len();
        }
        lengths
    }

    /// Number of distinct stop combinations
    pub fn total_combinations(&self) -> u128 {
        self.strips.iter().map(|s| s.len() as u128).product()
    }
}

/// One line per reel: `Reel 1 (47): TU SG LO ...`
impl fmt::Display for ReelSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, strip) in self.strips.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "Reel {} ({}):", strip.reel_index + 1, strip.len())?;
            for symbol in strip.symbols() {
                write!(f, " {symbol}")?;
            }
        }
        Ok(())
    }
}

impl Default for ReelSet {
    fn default() -> Self {
        Self::reference()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::session_rng;

    #[test]
    fn test_reference_lengths() {
        let reels = ReelSet::reference();
        assert_eq!(reels.lengths(), [47, 46, 48, 50, 50]);
        assert_eq!(reels.total_combinations(), 259_440_000);
        assert_eq!(reels.layout(), ReelLayout::Reference);
    }

    #[test]
    fn test_reference_symbol_variety() {
        let reels = ReelSet::reference();
        let variety: Vec<usize> = reels
            .strips()
            .iter()
            .map(|s| s.symbol_counts().iter().filter(|&&c| c > 0).count())
            .collect();
        assert_eq!(variety, vec![11, 11, 11, 10, 10]);
        // 11 × 11 × 11 × 10 × 10 line combinations
        assert_eq!(variety.iter().product::<usize>(), 133_100);
    }

    #[test]
    fn test_reference_counts() {
        let reels = ReelSet::reference();
        let expected: [[usize; SYMBOL_COUNT]; REEL_COUNT] = [
            [1, 1, 3, 4, 5, 6, 6, 7, 8, 4, 2],
            [1, 1, 3, 1, 5, 6, 6, 10, 7, 4, 2],
            [1, 1, 3, 4, 5, 6, 7, 7, 8, 4, 2],
            [1, 1, 4, 5, 6, 7, 7, 8, 9, 0, 2],
            [1, 1, 4, 5, 6, 7, 7, 8, 9, 0, 2],
        ];
        for (strip, counts) in reels.strips().iter().zip(expected) {
            assert_eq!(strip.symbol_counts(), counts, "reel {}", strip.reel_index());
        }
    }

    #[test]
    fn test_reference_scatters_spaced() {
        // No window of three consecutive stops shows two scatters
        for strip in ReelSet::reference().strips() {
            for stop in 0..strip.len() {
                let scatters = (0..3)
                    .filter(|&row| strip.symbol_at(stop + row).is_scatter())
                    .count();
                assert!(scatters <= 1, "reel {} stop {}", strip.reel_index(), stop);
            }
        }
    }

    #[test]
    fn test_shuffled_preserves_counts() {
        let reference = ReelSet::reference();
        for seed in 0..16 {
            let mut rng = session_rng(Some(seed));
            let shuffled = ReelSet::shuffled(&mut rng);
            assert_eq!(shuffled.layout(), ReelLayout::Shuffled);
            for (a, b) in reference.strips().iter().zip(shuffled.strips()) {
                let mut x = a.symbols().to_vec();
                let mut y = b.symbols().to_vec();
                x.sort();
                y.sort();
                assert_eq!(x, y);
            }
        }
    }

    #[test]
    fn test_build_by_layout() {
        let mut rng = session_rng(Some(5));
        let reference = ReelSet::build(ReelLayout::Reference, &mut rng).unwrap();
        assert_eq!(reference, ReelSet::reference());
        let shuffled = ReelSet::build(ReelLayout::Shuffled, &mut rng).unwrap();
        assert_eq!(shuffled.layout(), ReelLayout::Shuffled);
        assert!(matches!(
            ReelSet::build(ReelLayout::Custom, &mut rng),
            Err(SlotError::Config(_))
        ));
    }

    #[test]
    fn test_from_strips_validation() {
        assert_eq!(
            ReelSet::from_strips(vec![vec![Symbol::Tuna]; 4]),
            Err(SlotError::ReelCount(4))
        );

        let mut strips = vec![vec![Symbol::Tuna, Symbol::Clam]; REEL_COUNT];
        strips[3].clear();
        assert_eq!(ReelSet::from_strips(strips), Err(SlotError::EmptyReel(3)));

        let ok = ReelSet::from_strips(vec![vec![Symbol::Tuna]; REEL_COUNT]).unwrap();
        assert_eq!(ok.layout(), ReelLayout::Custom);
        assert_eq!(ok.lengths(), [1; REEL_COUNT]);
    }

    #[test]
    fn test_reel_listing() {
        let listing = ReelSet::reference().to_string();
        let lines: Vec<&str> = listing.lines().collect();
        assert_eq!(lines.len(), REEL_COUNT);
        assert!(lines[0].starts_with("Reel 1 (47): TU SG LO TU SF LH WS SF FS"));
        assert!(lines[4].starts_with("Reel 5 (50): SG TU SG"));
        assert!(lines[4].ends_with("BU FS LH"));

        let strips = vec![vec![Symbol::Buoy, Symbol::Wild]; REEL_COUNT];
        let custom = ReelSet::from_strips(strips).unwrap();
        assert!(custom.to_string().starts_with("Reel 1 (2): BU WS\nReel 2 (2): BU WS"));
    }

    #[test]
    fn test_strip_wrap() {
        let strip = ReelStrip::new(0, vec![Symbol::Tuna, Symbol::Clam, Symbol::Buoy]).unwrap();
        assert_eq!(strip.symbol_at(0), Symbol::Tuna);
        assert_eq!(strip.symbol_at(3), Symbol::Tuna);
        assert_eq!(strip.symbol_at(5), Symbol::Buoy);
    }
}
