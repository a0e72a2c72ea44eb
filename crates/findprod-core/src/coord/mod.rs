// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Completion coordinators.
//!
//! All three spawn one scoped thread per segment over the same
//! [`run_segment`](crate::run_segment) worker and differ only in how the
//! parent learns the round is over:
//!
//! | Strategy  | Parent waits by            | Early exit on zero |
//! |-----------|----------------------------|--------------------|
//! | `Join`    | joining handles in order   | no                 |
//! | `Poll`    | spinning over result slots | yes                |
//! | `Counted` | blocking on the latch      | yes                |
//!
//! Every coordinator joins all of its workers before returning, so the
//! caller may [`reset`](crate::SharedState::reset) and reuse the state.

mod counted;
mod join;
mod poll;

use std::fmt;
use std::str::FromStr;
use std::thread::ScopedJoinHandle;

use crate::error::FindProdError;
use crate::partition::Segment;
use crate::shared::{SharedState, WorkerState};
use crate::worker::SegmentOutcome;

/// Selectable completion strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Strategy {
    /// Parent joins every worker; no early exit.
    Join,
    /// Parent busy-polls result slots; cancels on the first zero.
    Poll,
    /// Parent blocks on a counted completion latch; cancels on zero.
    Counted,
}

impl Strategy {
    /// All strategies, in the order trials run them.
    pub const ALL: [Strategy; 3] = [Strategy::Join, Strategy::Poll, Strategy::Counted];

    /// Short lowercase name (`join`, `poll`, `counted`).
    pub const fn name(self) -> &'static str {
        match self {
            Self::Join => "join",
            Self::Poll => "poll",
            Self::Counted => "counted",
        }
    }

    /// Human-readable description used in reports.
    pub const fn describe(self) -> &'static str {
        match self {
            Self::Join => "parent waiting for all children",
            Self::Poll => "parent continually checking on children",
            Self::Counted => "parent waiting on a counted signal",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = FindProdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "join" => Ok(Self::Join),
            "poll" | "busy" => Ok(Self::Poll),
            "counted" | "signal" | "semaphore" => Ok(Self::Counted),
            other => Err(FindProdError::invalid(format!("unknown strategy: {other}"))),
        }
    }
}

/// What the parent learned from one coordinated round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordination {
    /// Strategy that ran.
    pub strategy: Strategy,
    /// A zero product was observed (by the parent for poll/counted, or in the
    /// slots after the fact for join).
    pub found_zero: bool,
    /// Workers that stopped on cancellation without publishing.
    pub cancelled: usize,
    /// Latch signals raised during the round (counted strategy only).
    pub signals: usize,
}

/// What a coordinator hands back once every worker has been joined.
struct Round {
    found_zero: bool,
    signals: usize,
    outcomes: Vec<SegmentOutcome>,
}

/// Runs one round of `strategy` over `segments` of `data`.
///
/// `shared` must be in its reset form and sized for `segments.len()`.
///
/// # Panics
///
/// If segment `i` does not carry index `i` or `shared` is sized for a
/// different worker count. Re-raises any worker panic after all workers
/// have been joined.
pub fn coordinate(
    strategy: Strategy,
    data: &[i32],
    segments: &[Segment],
    shared: &SharedState,
) -> Coordination {
    assert_eq!(shared.workers(), segments.len(), "one slot per segment");
    assert!(
        segments.iter().enumerate().all(|(i, s)| s.index == i),
        "segments must be indexed in order"
    );
    let round = match strategy {
        Strategy::Join => join::run(data, segments, shared),
        Strategy::Poll => poll::run(data, segments, shared),
        Strategy::Counted => counted::run(data, segments, shared),
    };
    let cancelled = round
        .outcomes
        .iter()
        .filter(|&&o| o == SegmentOutcome::Cancelled)
        .count();
    debug_assert_eq!(cancelled, shared.count_in(WorkerState::Cancelled));
    Coordination {
        strategy,
        found_zero: round.found_zero,
        cancelled,
        signals: round.signals,
    }
}

/// Joins handles in creation order, re-raising the first worker panic only
/// after every handle has been joined.
fn join_all(handles: Vec<ScopedJoinHandle<'_, SegmentOutcome>>) -> Vec<SegmentOutcome> {
    let mut panic = None;
    let mut outcomes = Vec::with_capacity(handles.len());
    for h in handles {
        match h.join() {
            Ok(outcome) => outcomes.push(outcome),
            Err(e) => {
                panic.get_or_insert(e);
            }
        }
    }
    if let Some(e) = panic {
        std::panic::resume_unwind(e);
    }
    outcomes
}
