// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Monotonic start/elapsed markers around each trial.

use std::time::{Duration, Instant};

/// Monotonic stopwatch; `start` sets the reference point.
#[derive(Clone, Copy, Debug)]
pub struct Stopwatch {
    started: Instant,
}

impl Stopwatch {
    /// Starts a new stopwatch now.
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    /// Time since the reference point.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}
