// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Validated run parameters.

use crate::constants::{DEFAULT_MAX_RANDOM, DEFAULT_SEED, MAX_SIZE, MAX_THREADS};
use crate::error::FindProdError;
use crate::input::InputSpec;

/// Parameters for one run: array shape, worker count and generator knobs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunConfig {
    /// Number of array elements, `1..=MAX_SIZE`.
    pub array_size: usize,
    /// Number of workers, `1..=MAX_THREADS`.
    pub thread_count: usize,
    /// Element forced to 0, if any.
    pub zero_index: Option<usize>,
    /// Input generator seed.
    pub seed: u64,
    /// Inclusive upper bound for generated elements.
    pub max_random: i32,
}

impl RunConfig {
    /// Config with default seed and range and no forced zero.
    pub fn new(array_size: usize, thread_count: usize) -> Self {
        Self {
            array_size,
            thread_count,
            zero_index: None,
            seed: DEFAULT_SEED,
            max_random: DEFAULT_MAX_RANDOM,
        }
    }

    /// Maps the command-line convention (`-1` = no zero) to an index.
    ///
    /// # Errors
    ///
    /// [`FindProdError::InvalidArgument`] for anything below `-1`.
    pub fn parse_zero_index(raw: i64) -> Result<Option<usize>, FindProdError> {
        match raw {
            -1 => Ok(None),
            r if r < -1 => Err(FindProdError::invalid(format!(
                "zero index must be -1 or a valid index, got {r}"
            ))),
            r => usize::try_from(r)
                .map(Some)
                .map_err(|_| FindProdError::invalid(format!("zero index {r} does not fit"))),
        }
    }

    /// Checks every bound. Does not check `thread_count <= array_size`; that
    /// is reported as [`FindProdError::DegenerateSegment`] by
    /// [`partition`](crate::partition).
    ///
    /// # Errors
    ///
    /// [`FindProdError::InvalidArgument`] naming the first bound violated.
    pub fn validate(&self) -> Result<(), FindProdError> {
        if self.array_size == 0 || self.array_size > MAX_SIZE {
            return Err(FindProdError::invalid(format!(
                "array size must be in 1..={MAX_SIZE}, got {}",
                self.array_size
            )));
        }
        if self.thread_count == 0 || self.thread_count > MAX_THREADS {
            return Err(FindProdError::invalid(format!(
                "thread count must be in 1..={MAX_THREADS}, got {}",
                self.thread_count
            )));
        }
        if let Some(idx) = self.zero_index {
            if idx >= self.array_size {
                return Err(FindProdError::invalid(format!(
                    "zero index {idx} out of bounds for array size {}",
                    self.array_size
                )));
            }
        }
        if self.max_random < 1 {
            return Err(FindProdError::invalid(format!(
                "max random must be at least 1, got {}",
                self.max_random
            )));
        }
        Ok(())
    }

    /// Input recipe matching this config.
    pub fn input_spec(&self) -> InputSpec {
        InputSpec {
            len: self.array_size,
            zero_index: self.zero_index,
            seed: self.seed,
            max_random: self.max_random,
        }
    }
}
