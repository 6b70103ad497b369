//! Degree sources — where the generator gets its random scale degree.
//!
//! Generation takes any [`DegreeSource`], so tests can script the exact
//! sequence of degrees while the app uses a seedable ChaCha stream.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Supplies scale degrees to the chord generator.
pub trait DegreeSource {
    /// Return a degree in `0..count`.
    fn next_degree(&mut self, count: usize) -> usize;
}

/// Uniformly random degrees from a ChaCha8 stream.
#[derive(Debug, Clone)]
pub struct RandomDegrees {
    rng: ChaCha8Rng,
}

impl RandomDegrees {
    /// Reproducible stream for a given seed.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Stream seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }
}

impl DegreeSource for RandomDegrees {
    fn next_degree(&mut self, count: usize) -> usize {
        self.rng.gen_range(0..count)
    }
}

/// Replays a fixed list of degrees, cycling when exhausted.
///
/// Values are reduced modulo `count` so a script can never produce an
/// out-of-range degree.
#[derive(Debug, Clone)]
pub struct FixedDegrees {
    degrees: Vec<usize>,
    pos: usize,
}

impl FixedDegrees {
    pub fn new(degrees: impl Into<Vec<usize>>) -> Self {
        Self {
            degrees: degrees.into(),
            pos: 0,
        }
    }

    /// Always the same degree.
    pub fn constant(degree: usize) -> Self {
        Self::new(vec![degree])
    }
}

impl DegreeSource for FixedDegrees {
    fn next_degree(&mut self, count: usize) -> usize {
        if self.degrees.is_empty() {
            return 0;
        }
        let degree = self.degrees[self.pos % self.degrees.len()];
        self.pos += 1;
        degree % count
    }
}
