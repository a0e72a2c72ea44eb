// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Counted-signal coordinator: the parent blocks once on the latch.

use std::thread;

use tracing::debug;

use crate::partition::Segment;
use crate::shared::SharedState;
use crate::worker::{run_segment, CompletionAction};

use super::{join_all, Round};

/// Spawns every worker, waits for the latch exactly once, cancels the round
/// if a slot reads 0, then joins every worker.
///
/// The reported signal count covers the whole round and is read after the
/// join.
pub(super) fn run(data: &[i32], segments: &[Segment], shared: &SharedState) -> Round {
    let (found_zero, outcomes) = thread::scope(|s| {
        let handles: Vec<_> = segments
            .iter()
            .map(|&seg| {
                shared.mark_running(seg.index);
                s.spawn(move || run_segment(data, seg, shared, CompletionAction::CountedSignal))
            })
            .collect();

        let at_wake = shared.latch().wait();
        let zero = shared.find_zero();
        if let Some(worker) = zero {
            debug!(worker, signals = at_wake, "latch woke on zero; cancelling");
            shared.request_cancel();
        }

        (zero.is_some(), join_all(handles))
    });
    Round {
        found_zero,
        signals: shared.latch().signals(),
        outcomes,
    }
}
