use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of randomness for move selection and first-player draws.
///
/// Production code uses [`SessionRng`]; tests plug in a scripted source so
/// the chosen cell is known in advance.
pub trait RandomSource {
    /// Returns an index in `0..len`. `len` is never zero.
    fn random_index(&mut self, len: usize) -> usize;
}

pub struct SessionRng {
    rng: StdRng,
    seed: u64,
}

impl SessionRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    pub fn from_random() -> Self {
        let seed: u64 = rand::rng().random();
        Self::new(seed)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SessionRng {
    fn random_index(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len)
    }
}

#[cfg(test)]
pub(crate) struct ScriptedRng {
    indices: Vec<usize>,
    next: usize,
}

#[cfg(test)]
impl ScriptedRng {
    pub(crate) fn new(indices: Vec<usize>) -> Self {
        Self { indices, next: 0 }
    }
}

#[cfg(test)]
impl RandomSource for ScriptedRng {
    fn random_index(&mut self, len: usize) -> usize {
        let index = self.indices[self.next % self.indices.len()];
        self.next += 1;
        index % len
    }
}
