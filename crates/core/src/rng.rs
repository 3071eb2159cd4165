//! RNG module - memoryless random piece generation
//!
//! Every draw picks one of the seven kinds with equal probability,
//! independently of earlier draws. There is no bag: the same kind can come up
//! any number of times in a row.
//!
//! The generator is a small seeded LCG so whole games are reproducible from a
//! seed.

use crate::pieces::Piece;
use crate::types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
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
    ///
    /// Scales by the high bits; the low bits of a power-of-two LCG cycle
    /// with short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Current internal state
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Produces the next random piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceSpawner {
    rng: SimpleRng,
}

impl PieceSpawner {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }

    /// Pick a kind uniformly at random.
    pub fn next_kind(&mut self) -> PieceKind {
        PieceKind::ALL[self.rng.next_range(PieceKind::ALL.len() as u32) as usize]
    }

    /// Generate a fresh piece in its spawn orientation.
    pub fn generate_piece(&mut self) -> Piece {
        Piece::new(self.next_kind())
    }

    /// Current generator state. A restarted game is seeded from here.
    pub fn rng_state(&self) -> u32 {
        self.rng.state()
    }
}

impl Default for PieceSpawner {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_zero_seed() {
        assert_eq!(SimpleRng::new(0), SimpleRng::new(1));
    }

    #[test]
    fn test_next_range_bounds() {
        let mut rng = SimpleRng::new(99);
        for _ in 0..1000 {
            assert!(rng.next_range(7) < 7);
        }
    }

    #[test]
    fn test_spawner_covers_every_kind() {
        let mut spawner = PieceSpawner::new(7);
        let mut counts = [0u32; 7];
        for _ in 0..7000 {
            let kind = spawner.next_kind();
            let idx = PieceKind::ALL.iter().position(|&k| k == kind).unwrap();
            counts[idx] += 1;
        }
        // Roughly 1000 each; a generous band keeps this stable.
        for (kind, &count) in PieceKind::ALL.iter().zip(counts.iter()) {
            assert!((700..1300).contains(&count), "{:?} drawn {} times", kind, count);
        }
    }

    #[test]
    fn test_spawner_can_repeat() {
        // No bag: within a long run some kind must follow itself.
        let mut spawner = PieceSpawner::new(12345);
        let mut prev = spawner.next_kind();
        let mut repeated = false;
        for _ in 0..200 {
            let kind = spawner.next_kind();
            if kind == prev {
                repeated = true;
                break;
            }
            prev = kind;
        }
        assert!(repeated);
    }

    #[test]
    fn test_generate_piece_spawn_orientation() {
        let mut spawner = PieceSpawner::new(3);
        let piece = spawner.generate_piece();
        assert_eq!(piece, Piece::new(piece.kind));
    }
}
