// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Hand-built segment descriptors: empty segments finish with the identity,
//! and a worker that panics is re-raised by every coordinator instead of
//! leaving the parent waiting.

#![allow(missing_docs)]
#![allow(clippy::panic)]
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use findprod_core::{run_strategy, Segment, SharedState, Strategy, TrialReport};

const DEADLINE: Duration = Duration::from_secs(10);

/// Runs one trial on a helper thread and reports whether it panicked.
/// Fails the test if the trial does not return within [`DEADLINE`].
fn run_bounded(
    strategy: Strategy,
    data: Vec<i32>,
    segments: Vec<Segment>,
) -> Result<TrialReport, ()> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let shared = SharedState::new(segments.len());
        let res = panic::catch_unwind(AssertUnwindSafe(|| {
            run_strategy(strategy, &data, &segments, &shared)
        }));
        let _ = tx.send(res.map_err(|_| ()));
    });
    rx.recv_timeout(DEADLINE)
        .unwrap_or_else(|_| panic!("{strategy} did not return within {DEADLINE:?}"))
}

#[test]
fn empty_segment_contributes_identity() {
    let segments = vec![
        Segment {
            index: 0,
            start: 0,
            end: 3,
        },
        Segment {
            index: 1,
            start: 6,
            end: 4,
        },
    ];
    for strategy in Strategy::ALL {
        let report = run_bounded(strategy, vec![3; 8], segments.clone())
            .unwrap_or_else(|()| panic!("{strategy} panicked"));
        assert_eq!(report.product, 81, "{strategy}");
        let coord = report.coordination.expect("threaded trial");
        assert!(!coord.found_zero);
        assert_eq!(coord.cancelled, 0);
    }
}

#[test]
fn worker_panic_is_reraised_by_every_strategy() {
    // Segment 1 runs past the end of the data.
    let segments = vec![
        Segment {
            index: 0,
            start: 0,
            end: 3,
        },
        Segment {
            index: 1,
            start: 4,
            end: 20,
        },
    ];
    for strategy in Strategy::ALL {
        assert!(
            run_bounded(strategy, vec![3; 8], segments.clone()).is_err(),
            "{strategy} swallowed the worker panic"
        );
    }
}

#[test]
fn misindexed_segments_are_rejected_before_spawning() {
    let segments = vec![Segment {
        index: 3,
        start: 0,
        end: 7,
    }];
    for strategy in Strategy::ALL {
        assert!(run_bounded(strategy, vec![3; 8], segments.clone()).is_err());
    }
}
