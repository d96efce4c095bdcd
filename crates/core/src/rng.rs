//! RNG module - deterministic tile color generation
//!
//! New tiles are drawn from a [`ColorSource`]. [`RandomColors`] draws
//! uniformly over the palette from a small LCG so that a seed fully
//! determines a game; [`ScriptedColors`] replays a fixed sequence, which is
//! what replays and hand-built puzzles want.

use std::fmt::Debug;

use crate::types::{TileColor, PALETTE_SIZE};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // Low LCG bits cycle with short periods; take the high half.
        (self.next_u32() >> 16) % max
    }
}

/// Supplier of colors for newly spawned tiles
pub trait ColorSource: Debug + Send {
    /// Next tile color
    fn next_color(&mut self) -> TileColor;

    /// Restart the sequence from `seed`
    fn reseed(&mut self, seed: u32);
}

/// Uniform palette draws from a [`SimpleRng`]
#[derive(Debug, Clone)]
pub struct RandomColors {
    rng: SimpleRng,
}

impl RandomColors {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }

    /// Seed from OS entropy
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }
}

impl ColorSource for RandomColors {
    fn next_color(&mut self) -> TileColor {
        TileColor::from_index(self.rng.next_range(PALETTE_SIZE as u32) as usize)
    }

    fn reseed(&mut self, seed: u32) {
        self.rng = SimpleRng::new(seed);
    }
}

/// Cycles through a fixed list of colors
///
/// Reseeding rewinds to the start of the list; the seed value is ignored.
#[derive(Debug, Clone)]
pub struct ScriptedColors {
    colors: Vec<TileColor>,
    cursor: usize,
}

impl ScriptedColors {
    /// An empty list behaves like `[Red]`
    pub fn new(colors: Vec<TileColor>) -> Self {
        let colors = if colors.is_empty() {
            vec![TileColor::Red]
        } else {
            colors
        };
        Self { colors, cursor: 0 }
    }

    /// Number of colors handed out so far
    pub fn drawn(&self) -> usize {
        self.cursor
    }
}

impl ColorSource for ScriptedColors {
    fn next_color(&mut self) -> TileColor {
        let color = self.colors[self.cursor % self.colors.len()];
        self.cursor += 1;
        color
    }

    fn reseed(&mut self, _seed: u32) {
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        // Same seed should produce same sequence
        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(54321);

        let v1 = rng1.next_u32();
        let v2 = rng2.next_u32();
        assert_ne!(v1, v2);
    }

    #[test]
    fn test_random_colors_cover_palette() {
        let mut source = RandomColors::new(7);
        let mut seen = [0u32; PALETTE_SIZE];
        for _ in 0..600 {
            seen[source.next_color().index()] += 1;
        }
        assert!(seen.iter().all(|&n| n > 0), "palette not covered: {:?}", seen);
    }

    #[test]
    fn test_random_colors_reseed_restarts() {
        let mut source = RandomColors::new(99);
        let first: Vec<_> = (0..10).map(|_| source.next_color()).collect();
        source.reseed(99);
        let again: Vec<_> = (0..10).map(|_| source.next_color()).collect();
        assert_eq!(first, again);
    }

    #[test]
    fn test_entropy_sources_agree_after_reseed() {
        let mut a = RandomColors::from_entropy();
        let mut b = RandomColors::from_entropy();
        a.reseed(2024);
        b.reseed(2024);
        let left: Vec<_> = (0..16).map(|_| a.next_color()).collect();
        let right: Vec<_> = (0..16).map(|_| b.next_color()).collect();
        assert_eq!(left, right);
    }

    #[test]
    fn test_scripted_colors_cycle_and_rewind() {
        let mut source = ScriptedColors::new(vec![TileColor::Blue, TileColor::Green]);
        assert_eq!(source.next_color(), TileColor::Blue);
        assert_eq!(source.next_color(), TileColor::Green);
        assert_eq!(source.next_color(), TileColor::Blue);
        assert_eq!(source.drawn(), 3);

        source.reseed(0);
        assert_eq!(source.next_color(), TileColor::Blue);

        let mut empty = ScriptedColors::new(Vec::new());
        assert_eq!(empty.next_color(), TileColor::Red);
    }
}
