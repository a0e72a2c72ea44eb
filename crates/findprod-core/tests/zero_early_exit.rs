// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! A single zero forces every strategy to 0 and lets poll/counted cancel.

#![allow(missing_docs)]
use findprod_core::{
    aggregate_products, run_strategy, sequential_product, RunConfig, Strategy, WorkerState,
};

mod common;
use common::{make_data, setup, WORKER_COUNTS};

#[test]
fn ten_elements_three_workers_zero_at_five() {
    let data = make_data(10, 7649, Some(5));
    let (segments, shared) = setup(data.len(), 3);
    // Index 5 lives in the middle segment [4, 6].
    assert!(segments[1].contains(5));

    for strategy in Strategy::ALL {
        let report = run_strategy(strategy, &data, &segments, &shared);
        assert_eq!(report.product, 0, "{strategy}");
        assert!(report.coordination.expect("threaded").found_zero);
        assert_eq!(shared.product(1), 0, "{strategy}: owning segment reports 0");
        assert_eq!(shared.state(1), WorkerState::Finished);
    }
}

#[test]
fn aggregate_is_zero_regardless_of_other_segments() {
    assert_eq!(aggregate_products(&[1, 0, 1]), 0);
    assert_eq!(aggregate_products(&[4231, 0, 9972]), 0);
}

#[test]
fn zero_anywhere_yields_zero_for_all_worker_counts() {
    let len = 1_000;
    for &workers in WORKER_COUNTS {
        for zero_at in [0, len / 2, len - 1] {
            let data = make_data(len, 99, Some(zero_at));
            assert_eq!(sequential_product(&data), 0);
            let (segments, shared) = setup(len, workers);
            for strategy in Strategy::ALL {
                let report = run_strategy(strategy, &data, &segments, &shared);
                assert_eq!(
                    report.product, 0,
                    "{strategy}, {workers} workers, zero at {zero_at}"
                );
            }
        }
    }
}

#[test]
fn every_worker_ends_terminal_after_cancellation() {
    // Zero at the very front: worker 0 finishes immediately while the rest
    // still have a long scan ahead, so poll and counted usually cancel.
    let len = 2_000_000;
    let workers = 4;
    let data = make_data(len, 5, Some(0));
    let (segments, shared) = setup(len, workers);

    for strategy in [Strategy::Poll, Strategy::Counted] {
        let report = run_strategy(strategy, &data, &segments, &shared);
        let coord = report.coordination.expect("threaded");
        assert_eq!(report.product, 0);
        assert!(coord.found_zero);
        assert!(shared.is_cancel_requested());
        assert!(coord.cancelled < workers, "the zero finder is never cancelled");
        assert_eq!(shared.state(0), WorkerState::Finished);

        for i in 0..workers {
            let state = shared.state(i);
            assert!(state.is_terminal(), "{strategy}: worker {i} is {state:?}");
            match state {
                // Cancelled workers never publish: identity slot, not done.
                WorkerState::Cancelled => {
                    assert_eq!(shared.product(i), 1);
                    assert!(!shared.is_done(i));
                }
                _ => assert!(shared.is_done(i)),
            }
        }
    }
}

#[test]
fn join_never_cancels() {
    let data = make_data(200_000, 5, Some(0));
    let (segments, shared) = setup(data.len(), 4);
    let report = run_strategy(Strategy::Join, &data, &segments, &shared);
    let coord = report.coordination.expect("threaded");
    assert!(coord.found_zero);
    assert_eq!(coord.cancelled, 0);
    assert!(!shared.is_cancel_requested());
    assert_eq!(shared.count_in(WorkerState::Finished), 4);
}

#[test]
fn counted_signals_stay_within_worker_count() {
    // Every segment holds a zero, so every worker signals.
    let workers = 4;
    let mut data = make_data(40, 8, None);
    for i in (0..40).step_by(10) {
        data[i] = 0;
    }
    let (segments, shared) = setup(data.len(), workers);
    let report = run_strategy(Strategy::Counted, &data, &segments, &shared);
    let coord = report.coordination.expect("threaded");
    assert!(coord.signals >= 1);
    assert!(coord.signals <= workers);
    assert_eq!(report.product, 0);
}

#[test]
fn run_reports_zero_segment() {
    let mut cfg = RunConfig::new(10, 3);
    cfg.zero_index = Some(5);
    let report = findprod_core::run(&cfg, &Strategy::ALL).expect("valid run");
    assert_eq!(report.zero_segment, Some(1));
    assert!(report.trials.iter().all(|t| t.product == 0));
}
