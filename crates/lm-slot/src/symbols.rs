//! Symbol definitions

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of distinct symbols
pub const SYMBOL_COUNT: usize = 11;

/// A reel symbol.
///
/// Discriminants double as paytable row indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Symbol {
    /// Substitutes for any symbol on a payline
    Wild = 0,
    /// Top line symbol, five of a kind is the jackpot
    Lobster = 1,
    Buoy = 2,
    Boat = 3,
    Lighthouse = 4,
    Tuna = 5,
    Clam = 6,
    Seagull = 7,
    Starfish = 8,
    /// Line symbol found on reels 1–3 only
    Bonus = 9,
    /// Pays by count anywhere on the board, never on a line
    Scatter = 10,
}

impl Symbol {
    /// All symbols in id order
    pub const ALL: [Symbol; SYMBOL_COUNT] = [
        Symbol::Wild,
        Symbol::Lobster,
        Symbol::Buoy,
        Symbol::Boat,
        Symbol::Lighthouse,
        Symbol::Tuna,
        Symbol::Clam,
        Symbol::Seagull,
        Symbol::Starfish,
        Symbol::Bonus,
        Symbol::Scatter,
    ];

    /// Symbol id (0..11)
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Look up a symbol by id
    pub fn from_index(index: usize) -> Option<Symbol> {
        Self::ALL.get(index).copied()
    }

    /// Two-letter code used in reel listings (`ReelSet`'s `Display`) and board rendering
    pub fn code(self) -> &'static str {
        match self {
            Symbol::Wild => "WS",
            Symbol::Lobster => "LM",
            Symbol::Buoy => "BU",
            Symbol::Boat => "BO",
            Symbol::Lighthouse => "LH",
            Symbol::Tuna => "TU",
            Symbol::Clam => "CL",
            Symbol::Seagull => "SG",
            Symbol::Starfish => "SF",
            Symbol::Bonus => "LO",
            Symbol::Scatter => "FS",
        }
    }

    /// Parse a two-letter code
    pub fn from_code(code: &str) -> Option<Symbol> {
        Self::ALL.iter().copied().find(|s| s.code() == code)
    }

    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            Symbol::Wild => "Wild",
            Symbol::Lobster => "Lobster",
            Symbol::Buoy => "Buoy",
            Symbol::Boat => "Boat",
            Symbol::Lighthouse => "Lighthouse",
            Symbol::Tuna => "Tuna",
            Symbol::Clam => "Clam",
            Symbol::Seagull => "Seagull",
            Symbol::Starfish => "Starfish",
            Symbol::Bonus => "Bonus",
            Symbol::Scatter => "Scatter",
        }
    }

    #[inline]
    pub fn is_wild(self) -> bool {
        self == Symbol::Wild
    }

    #[inline]
    pub fn is_scatter(self) -> bool {
        self == Symbol::Scatter
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trip() {
        for (i, symbol) in Symbol::ALL.iter().enumerate() {
            assert_eq!(symbol.index(), i);
            assert_eq!(Symbol::from_index(i), Some(*symbol));
        }
        assert_eq!(Symbol::from_index(SYMBOL_COUNT), None);
    }

    #[test]
    fn test_codes_unique() {
        for a in Symbol::ALL {
            assert_eq!(Symbol::from_code(a.code()), Some(a));
        }
        assert_eq!(Symbol::from_code("XX"), None);
    }

    #[test]
    fn test_special_symbols() {
        assert!(Symbol::Wild.is_wild());
        assert!(Symbol::Scatter.is_scatter());
        assert!(!Symbol::Lobster.is_wild());
        assert!(!Symbol::Bonus.is_scatter());
    }
}
