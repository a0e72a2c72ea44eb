// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Deterministic input generation.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::constants::{DEFAULT_MAX_RANDOM, DEFAULT_SEED};
use crate::error::FindProdError;

/// Recipe for a reproducible input array.
///
/// Elements are drawn uniformly from `[1, max_random]` by a seeded
/// [`StdRng`]; if `zero_index` is set, that one element is overwritten with
/// 0. The same spec always yields the same array within one `rand` release.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InputSpec {
    /// Number of elements.
    pub len: usize,
    /// Element forced to 0, if any.
    pub zero_index: Option<usize>,
    /// Generator seed.
    pub seed: u64,
    /// Inclusive upper bound for generated elements (at least 1).
    pub max_random: i32,
}

impl InputSpec {
    /// Spec with the default seed and range and no forced zero.
    pub fn new(len: usize) -> Self {
        Self {
            len,
            zero_index: None,
            seed: DEFAULT_SEED,
            max_random: DEFAULT_MAX_RANDOM,
        }
    }

    /// Forces element `idx` to 0.
    pub fn with_zero_at(mut self, idx: usize) -> Self {
        self.zero_index = Some(idx);
        self
    }

    /// Overrides the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Overrides the element upper bound.
    pub fn with_max_random(mut self, max_random: i32) -> Self {
        self.max_random = max_random;
        self
    }

    /// Builds the array.
    ///
    /// # Errors
    ///
    /// [`FindProdError::InvalidArgument`] if `max_random < 1` or `zero_index`
    /// is out of bounds.
    pub fn generate(&self) -> Result<Vec<i32>, FindProdError> {
        if self.max_random < 1 {
            return Err(FindProdError::invalid(format!(
                "max random must be at least 1, got {}",
                self.max_random
            )));
        }
        if let Some(idx) = self.zero_index {
            if idx >= self.len {
                return Err(FindProdError::invalid(format!(
                    "zero index {idx} out of bounds for {} elements",
                    self.len
                )));
            }
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut data: Vec<i32> = (0..self.len)
            .map(|_| rng.gen_range(1..=self.max_random))
            .collect();
        if let Some(idx) = self.zero_index {
            data[idx] = 0;
        }
        Ok(data)
    }
}
