//! Random source and shuffling

use std::ops::Range;

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Uniform integer draws in a half-open range.
///
/// The only source of non-determinism in the engine. Every [`rand::Rng`]
/// is a `RandomSource`, so seeded generators work out of the box.
pub trait RandomSource {
    /// Draw uniformly from `range` (`range.start..range.end`, end excluded).
    ///
    /// Callers never pass an empty range.
    fn draw(&mut self, range: Range<usize>) -> usize;
}

impl<R: Rng + ?Sized> RandomSource for R {
    #[inline]
    fn draw(&mut self, range: Range<usize>) -> usize {
        self.random_range(range)
    }
}

/// Default session generator
pub type SessionRng = ChaCha8Rng;

/// Build the session generator from an optional seed
pub fn session_rng(seed: Option<u64>) -> SessionRng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_os_rng(),
    }
}

/// In-place Fisher–Yates shuffle.
///
/// For each position `i` except the last, swaps in an element drawn
/// uniformly from `[i, len)`. Slices of length 0 or 1 are left untouched
/// and consume no draws.
pub fn shuffle<T, R: RandomSource + ?Sized>(items: &mut [T], rng: &mut R) {
    let len = items.len();
    if len < 2 {
        return;
    }
    for i in 0..len - 1 {
        let j = rng.draw(i..len);
        items.swap(i, j);
    }
}

/// Replays a fixed sequence of draws (test helper).
///
/// Each value is reduced into the requested range, so a script can be
/// written in terms of stop indices directly.
#[cfg(test)]
pub(crate) struct ScriptedSource {
    values: Vec<usize>,
    pos: usize,
}

#[cfg(test)]
impl ScriptedSource {
    pub(crate) fn new(values: Vec<usize>) -> Self {
        Self { values, pos: 0 }
    }

    pub(crate) fn draws(&self) -> usize {
        self.pos
    }
}

#[cfg(test)]
impl RandomSource for ScriptedSource {
    fn draw(&mut self, range: Range<usize>) -> usize {
        let v = self.values[self.pos % self.values.len()];
        self.pos += 1;
        range.start + v % (range.end - range.start)
    }
}
