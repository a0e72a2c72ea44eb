// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Cross-thread state for one run, reset between trials.
//!
//! # Publication protocol
//!
//! Each slot has exactly one writer (the worker owning that segment):
//!
//! 1. `products[i].store(p, Release)`
//! 2. `done[i].store(true, Release)`
//!
//! Readers use `Acquire`. A reader that sees `done[i] == true` also sees the
//! final product, and a reader of `products[i]` sees either the identity 1
//! or the published value, never a partial write.

use std::sync::atomic::{AtomicBool, AtomicI32, AtomicU8, Ordering};

use crate::latch::CompletionLatch;

/// Worker lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum WorkerState {
    /// Slot allocated, thread not started yet.
    Created = 0,
    /// Thread spawned and scanning.
    Running = 1,
    /// Product published.
    Finished = 2,
    /// Stopped on request before publishing.
    Cancelled = 3,
    /// Unwound before publishing; the coordinator re-raises the panic.
    Panicked = 4,
}

impl WorkerState {
    const fn from_u8(v: u8) -> Self {
        match v {
            1 => Self::Running,
            2 => Self::Finished,
            3 => Self::Cancelled,
            4 => Self::Panicked,
            _ => Self::Created,
        }
    }

    /// `Finished`, `Cancelled` or `Panicked`.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Finished | Self::Cancelled | Self::Panicked)
    }
}

/// Result slots, done flags, lifecycle states, the completion latch and the
/// round's cancellation flag, indexed by segment.
#[derive(Debug)]
pub struct SharedState {
    products: Box<[AtomicI32]>,
    done: Box<[AtomicBool]>,
    states: Box<[AtomicU8]>,
    latch: CompletionLatch,
    cancel: AtomicBool,
}

impl SharedState {
    /// Allocates state for `workers` segments, already in its reset form.
    pub fn new(workers: usize) -> Self {
        Self {
            products: (0..workers).map(|_| AtomicI32::new(1)).collect(),
            done: (0..workers).map(|_| AtomicBool::new(false)).collect(),
            states: (0..workers)
                .map(|_| AtomicU8::new(WorkerState::Created as u8))
                .collect(),
            latch: CompletionLatch::new(workers),
            cancel: AtomicBool::new(false),
        }
    }

    /// Number of segment slots.
    pub fn workers(&self) -> usize {
        self.products.len()
    }

    /// Restores every slot to identity, clears flags and counters, and re-arms
    /// the latch. Must not be called while workers of a previous round are
    /// still alive; coordinators join before returning, so between trials is
    /// always safe.
    pub fn reset(&self) {
        for p in &*self.products {
            p.store(1, Ordering::Relaxed);
        }
        for d in &*self.done {
            d.store(false, Ordering::Relaxed);
        }
        for s in &*self.states {
            s.store(WorkerState::Created as u8, Ordering::Relaxed);
        }
        self.cancel.store(false, Ordering::Relaxed);
        self.latch.reset(self.workers());
    }

    /// Publishes `product` for segment `index` (value first, then done flag).
    pub(crate) fn publish(&self, index: usize, product: i32) {
        self.products[index].store(product, Ordering::Release);
        self.done[index].store(true, Ordering::Release);
    }

    /// Raises the done flag without touching the result slot.
    pub(crate) fn mark_done(&self, index: usize) {
        self.done[index].store(true, Ordering::Release);
    }

    /// Current value of a result slot.
    pub fn product(&self, index: usize) -> i32 {
        self.products[index].load(Ordering::Acquire)
    }

    /// Snapshot of every result slot.
    pub fn products(&self) -> Vec<i32> {
        (0..self.workers()).map(|i| self.product(i)).collect()
    }

    /// Returns `true` once worker `index` has published.
    pub fn is_done(&self, index: usize) -> bool {
        self.done[index].load(Ordering::Acquire)
    }

    /// Current lifecycle state of worker `index`.
    pub fn state(&self, index: usize) -> WorkerState {
        WorkerState::from_u8(self.states[index].load(Ordering::Acquire))
    }

    /// `Created → Running`. Called by the parent right before spawning.
    pub(crate) fn mark_running(&self, index: usize) {
        self.states[index].store(WorkerState::Running as u8, Ordering::Release);
    }

    /// `Created → Running` from the worker side; no-op if the parent already
    /// marked it.
    pub(crate) fn mark_started(&self, index: usize) {
        let _ = self.states[index].compare_exchange(
            WorkerState::Created as u8,
            WorkerState::Running as u8,
            Ordering::AcqRel,
            Ordering::Acquire,
        );
    }

    /// Moves a running worker to `to`. No-op (returns `false`) if the worker
    /// already reached a terminal state.
    pub(crate) fn finish_as(&self, index: usize, to: WorkerState) -> bool {
        self.states[index]
            .compare_exchange(
                WorkerState::Running as u8,
                to as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_ok()
    }

    /// Asks every still-running worker to stop. Workers that already finished
    /// are unaffected.
    pub fn request_cancel(&self) {
        self.cancel.store(true, Ordering::Release);
    }

    /// Returns `true` once cancellation was requested this round.
    pub fn is_cancel_requested(&self) -> bool {
        self.cancel.load(Ordering::Acquire)
    }

    /// The counted-signal completion object.
    pub fn latch(&self) -> &CompletionLatch {
        &self.latch
    }

    /// Index of the first slot currently holding 0, if any.
    pub fn find_zero(&self) -> Option<usize> {
        (0..self.workers()).find(|&i| self.product(i) == 0)
    }

    /// Number of workers that ended in `state`.
    pub fn count_in(&self, state: WorkerState) -> usize {
        (0..self.workers()).filter(|&i| self.state(i) == state).count()
    }
}
