//! Sources of choice for the chain
//!
//! The chain never calls `rand` directly: every backend and language pick goes
//! through a [`Picker`], so a run can be driven by entropy, by a seed, or by a
//! fixed script in tests.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Chooses an index in `0..len`
///
/// `len` is never zero when the chain asks. Indices outside the range wrap.
pub trait Picker {
    fn pick(&mut self, len: usize) -> usize;
}

impl<F> Picker for F
where
    F: FnMut(usize) -> usize,
{
    fn pick(&mut self, len: usize) -> usize {
        self(len)
    }
}

/// Uniform random picks
#[derive(Debug, Clone)]
pub struct RandomPicker {
    rng: StdRng,
}

impl RandomPicker {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible picks: the same seed gives the same sequence
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Picker for RandomPicker {
    fn pick(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

/// Replays a fixed list of indices, cycling when it runs out
#[derive(Debug, Clone)]
pub struct ScriptedPicker {
    script: Vec<usize>,
    position: usize,
}

impl ScriptedPicker {
    pub fn new(script: impl Into<Vec<usize>>) -> Self {
        Self {
            script: script.into(),
            position: 0,
        }
    }

    /// How many picks have been made
    pub fn picks(&self) -> usize {
        self.position
    }
}

impl Picker for ScriptedPicker {
    fn pick(&mut self, len: usize) -> usize {
        if self.script.is_empty() {
            return 0;
        }
        let index = self.script[self.position % self.script.len()];
        self.position += 1;
        index % len
    }
}
