// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Join-based coordinator: the naive baseline.

use std::thread;

use crate::partition::Segment;
use crate::shared::SharedState;
use crate::worker::{run_segment, CompletionAction};

use super::{join_all, Round};

/// Spawns every worker, then joins them in creation order. A zero found
/// mid-run does not shorten the round.
pub(super) fn run(data: &[i32], segments: &[Segment], shared: &SharedState) -> Round {
    let outcomes = thread::scope(|s| {
        let handles: Vec<_> = segments
            .iter()
            .map(|&seg| {
                shared.mark_running(seg.index);
                s.spawn(move || run_segment(data, seg, shared, CompletionAction::Publish))
            })
            .collect();

        join_all(handles)
    });
    Round {
        found_zero: shared.find_zero().is_some(),
        signals: 0,
        outcomes,
    }
}
