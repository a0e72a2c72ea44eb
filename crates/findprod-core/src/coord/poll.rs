// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Poll-based coordinator: the parent spins over the result slots.
//!
//! The spin burns a core for the whole round. That cost is the point of the
//! comparison, so the loop never parks or sleeps.

use std::hint;
use std::thread;

use tracing::debug;

use crate::partition::Segment;
use crate::shared::SharedState;
use crate::worker::{run_segment, CompletionAction};

use super::{join_all, Round};

/// Outcome of one pass over the slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Scan {
    /// Some slot reads 0.
    Zero(usize),
    /// Every worker published and no slot reads 0.
    AllDone,
    /// At least one worker is still scanning.
    Pending,
}

fn scan(shared: &SharedState) -> Scan {
    let mut all_done = true;
    for i in 0..shared.workers() {
        // Acquire loads: a slot reads either the identity or a published
        // product, so a 0 here is always a real zero.
        if shared.product(i) == 0 {
            return Scan::Zero(i);
        }
        if !shared.is_done(i) {
            all_done = false;
        }
    }
    if all_done {
        Scan::AllDone
    } else {
        Scan::Pending
    }
}

/// Spawns every worker and spins until all have published or a zero appears.
/// On a zero the round is cancelled; every worker is joined before returning.
pub(super) fn run(data: &[i32], segments: &[Segment], shared: &SharedState) -> Round {
    thread::scope(|s| {
        let handles: Vec<_> = segments
            .iter()
            .map(|&seg| {
                shared.mark_running(seg.index);
                s.spawn(move || run_segment(data, seg, shared, CompletionAction::Publish))
            })
            .collect();

        let found_zero = loop {
            match scan(shared) {
                Scan::Zero(worker) => {
                    debug!(worker, "poll observed zero product; cancelling");
                    shared.request_cancel();
                    break true;
                }
                Scan::AllDone => break false,
                Scan::Pending => hint::spin_loop(),
            }
        };

        Round {
            found_zero,
            signals: 0,
            outcomes: join_all(handles),
        }
    })
}
