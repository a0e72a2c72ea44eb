// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(dead_code)]

use findprod_core::{partition, InputSpec, Segment, SharedState};

/// Seeds exercised by multi-seed tests.
pub const SEEDS: &[u64] = &[7649, 1, 42, 0xDEAD_BEEF, 0x0123_4567_89AB_CDEF];

/// Worker counts exercised by worker-count invariance tests.
pub const WORKER_COUNTS: &[usize] = &[1, 2, 3, 4, 7, 8, 16];

/// Deterministic array of `len` elements with an optional forced zero.
pub fn make_data(len: usize, seed: u64, zero_at: Option<usize>) -> Vec<i32> {
    let mut spec = InputSpec::new(len).with_seed(seed);
    if let Some(idx) = zero_at {
        spec = spec.with_zero_at(idx);
    }
    spec.generate().expect("valid input spec")
}

/// Partition plus a freshly allocated shared state sized for it.
pub fn setup(len: usize, workers: usize) -> (Vec<Segment>, SharedState) {
    let segments = partition(len, workers).expect("valid partition");
    let shared = SharedState::new(segments.len());
    (segments, shared)
}
