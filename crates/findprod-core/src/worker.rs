// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Segment worker: local product, publication, completion action.

use std::thread;

use tracing::debug;

use crate::aggregate::mod_mul;
use crate::constants::CANCEL_CHECK_STRIDE;
use crate::partition::Segment;
use crate::shared::{SharedState, WorkerState};

/// What a worker does after publishing its product.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompletionAction {
    /// Publish only (join and poll coordinators observe slots/handles).
    Publish,
    /// Publish, then signal the latch on zero or arrive on it otherwise.
    CountedSignal,
}

/// How a segment scan ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SegmentOutcome {
    /// The scan completed (possibly early, on a zero) with this product.
    Product(i32),
    /// Cancellation was observed before the scan completed.
    Cancelled,
}

/// Multiplies `slice` modulo [`MODULUS`](crate::MODULUS), returning 0 at the
/// first zero element.
///
/// `cancelled` is polled once every [`CANCEL_CHECK_STRIDE`] elements; when it
/// returns `true` the scan stops with [`SegmentOutcome::Cancelled`].
pub fn segment_product(slice: &[i32], cancelled: impl Fn() -> bool) -> SegmentOutcome {
    let mut product = 1;
    for chunk in slice.chunks(CANCEL_CHECK_STRIDE) {
        if cancelled() {
            return SegmentOutcome::Cancelled;
        }
        for &x in chunk {
            if x == 0 {
                return SegmentOutcome::Product(0);
            }
            product = mod_mul(product, x);
        }
    }
    SegmentOutcome::Product(product)
}

/// Wakes the parent if the scan unwinds: the worker ends `Panicked`, its
/// done flag is raised and the latch is signaled, so every coordinator
/// reaches its join and re-raises the panic.
struct UnwindGuard<'a> {
    shared: &'a SharedState,
    index: usize,
}

impl Drop for UnwindGuard<'_> {
    fn drop(&mut self) {
        if thread::panicking() {
            self.shared.finish_as(self.index, WorkerState::Panicked);
            self.shared.mark_done(self.index);
            self.shared.latch().signal();
        }
    }
}

/// Runs one worker over `segment` of `data`.
///
/// Touches only slot `segment.index` of `shared`. A finished worker publishes
/// its product before performing `action`; a cancelled worker publishes
/// nothing and leaves its slot at the identity. An empty segment
/// (`start > end`) finishes at once with product 1.
pub fn run_segment(
    data: &[i32],
    segment: Segment,
    shared: &SharedState,
    action: CompletionAction,
) -> SegmentOutcome {
    let idx = segment.index;
    shared.mark_started(idx);
    debug!(
        worker = idx,
        start = segment.start,
        end = segment.end,
        "worker started"
    );

    let _guard = UnwindGuard { shared, index: idx };
    let outcome = if segment.is_empty() {
        SegmentOutcome::Product(1)
    } else {
        segment_product(&data[segment.range()], || shared.is_cancel_requested())
    };

    match outcome {
        SegmentOutcome::Product(product) => {
            shared.publish(idx, product);
            shared.finish_as(idx, WorkerState::Finished);
            if action == CompletionAction::CountedSignal {
                if product == 0 {
                    shared.latch().signal();
                } else {
                    shared.latch().arrive();
                }
            }
            debug!(worker = idx, product, "worker finished");
        }
        SegmentOutcome::Cancelled => {
            shared.finish_as(idx, WorkerState::Cancelled);
            debug!(worker = idx, "worker cancelled");
        }
    }
    outcome
}
