// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Counted completion event for the counted-signal coordinator.
//!
//! One object owns both the finished-count and the "all done or zero found"
//! event, so workers only ever touch it through [`CompletionLatch::arrive`]
//! and [`CompletionLatch::signal`].

use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct LatchState {
    /// Workers expected to arrive this round.
    expected: usize,
    /// Workers that arrived with a non-zero product.
    arrived: usize,
    /// Signals raised this round (zero finders plus the last arrival).
    signals: usize,
}

/// Mutex-guarded finished-count plus a condition variable acting as the
/// completion event.
///
/// The event is level-triggered: once signaled it stays signaled until
/// [`reset`](Self::reset), so extra signals are absorbed and a waiter that
/// arrives late never blocks.
#[derive(Debug, Default)]
pub struct CompletionLatch {
    state: Mutex<LatchState>,
    event: Condvar,
}

impl CompletionLatch {
    /// Creates a latch expecting `expected` arrivals.
    pub fn new(expected: usize) -> Self {
        Self {
            state: Mutex::new(LatchState {
                expected,
                ..LatchState::default()
            }),
            event: Condvar::new(),
        }
    }

    // Poisoning only means a worker panicked while holding the lock; the
    // counters are still coherent, and the panic resurfaces on join.
    fn lock(&self) -> MutexGuard<'_, LatchState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Clears all counters and re-arms the latch for `expected` arrivals.
    pub fn reset(&self, expected: usize) {
        *self.lock() = LatchState {
            expected,
            ..LatchState::default()
        };
    }

    /// Records a non-zero finish. The arrival that completes the count raises
    /// the event. Returns `true` for that arrival.
    pub fn arrive(&self) -> bool {
        let mut st = self.lock();
        st.arrived += 1;
        let last = st.arrived == st.expected;
        if last {
            st.signals += 1;
            self.event.notify_all();
        }
        last
    }

    /// Raises the event unconditionally (a worker found a zero). Safe to call
    /// any number of times.
    pub fn signal(&self) {
        let mut st = self.lock();
        st.signals += 1;
        self.event.notify_all();
    }

    /// Blocks until the event has been raised at least once this round.
    /// Returns the number of signals seen at wake-up time.
    pub fn wait(&self) -> usize {
        let guard = self.lock();
        self.event
            .wait_while(guard, |st| st.signals == 0)
            .unwrap_or_else(PoisonError::into_inner)
            .signals
    }

    /// Returns `true` if the event has been raised this round.
    pub fn is_signaled(&self) -> bool {
        self.lock().signals > 0
    }

    /// Signals raised so far this round.
    pub fn signals(&self) -> usize {
        self.lock().signals
    }

    /// Non-zero arrivals recorded so far this round.
    pub fn arrived(&self) -> usize {
        self.lock().arrived
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::expect_used)]
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn last_arrival_signals() {
        let latch = CompletionLatch::new(3);
        assert!(!latch.arrive());
        assert!(!latch.arrive());
        assert!(!latch.is_signaled());
        assert!(latch.arrive());
        assert_eq!(latch.wait(), 1);
    }

    #[test]
    fn repeated_signals_are_absorbed() {
        let latch = CompletionLatch::new(4);
        latch.signal();
        latch.signal();
        assert_eq!(latch.wait(), 2);
        // A second wait in the same round returns immediately.
        assert_eq!(latch.wait(), 2);
    }

    #[test]
    fn reset_clears_leftover_signal() {
        let latch = CompletionLatch::new(1);
        latch.signal();
        latch.reset(2);
        assert!(!latch.is_signaled());
        assert_eq!(latch.arrived(), 0);
        assert_eq!(latch.signals(), 0);
    }

    #[test]
    fn waiter_wakes_on_cross_thread_signal() {
        let latch = Arc::new(CompletionLatch::new(2));
        let workers: Vec<_> = (0..2)
            .map(|_| {
                let latch = Arc::clone(&latch);
                thread::spawn(move || {
                    latch.arrive();
                })
            })
            .collect();
        assert_eq!(latch.wait(), 1);
        for w in workers {
            w.join().unwrap();
        }
        assert_eq!(latch.arrived(), 2);
    }
}
