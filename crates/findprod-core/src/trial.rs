// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Timed trials: the sequential baseline followed by each strategy over one
//! reused [`SharedState`].

use std::fmt;
use std::time::Duration;

use tracing::info;

use crate::aggregate::aggregate;
use crate::config::RunConfig;
use crate::coord::{coordinate, Coordination, Strategy};
use crate::error::FindProdError;
use crate::partition::{owner_of, partition, Segment};
use crate::sequential::sequential_product;
use crate::shared::SharedState;
use crate::timing::Stopwatch;

/// Which computation a trial timed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TrialKind {
    /// Single-threaded oracle.
    Sequential,
    /// One coordinated threaded round.
    Threaded(Strategy),
}

impl fmt::Display for TrialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sequential => f.write_str("sequential"),
            Self::Threaded(s) => write!(f, "{s}"),
        }
    }
}

/// Result of one timed trial.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrialReport {
    /// What ran.
    pub kind: TrialKind,
    /// Wall-clock time from start marker to aggregated product.
    pub elapsed: Duration,
    /// Final modular product.
    pub product: i32,
    /// Coordination summary (threaded trials only).
    pub coordination: Option<Coordination>,
}

impl TrialReport {
    /// Whole milliseconds elapsed.
    pub fn elapsed_ms(&self) -> u128 {
        self.elapsed.as_millis()
    }
}

/// Resets `shared`, then times one round of `strategy` plus aggregation.
pub fn run_strategy(
    strategy: Strategy,
    data: &[i32],
    segments: &[Segment],
    shared: &SharedState,
) -> TrialReport {
    shared.reset();
    let clock = Stopwatch::start();
    let coordination = coordinate(strategy, data, segments, shared);
    let product = aggregate(shared);
    let elapsed = clock.elapsed();

    info!(
        strategy = %strategy,
        elapsed_ms = elapsed.as_millis() as u64,
        product,
        found_zero = coordination.found_zero,
        cancelled = coordination.cancelled,
        "threaded trial complete"
    );

    TrialReport {
        kind: TrialKind::Threaded(strategy),
        elapsed,
        product,
        coordination: Some(coordination),
    }
}

/// Times the sequential baseline.
pub fn run_sequential(data: &[i32]) -> TrialReport {
    let clock = Stopwatch::start();
    let product = sequential_product(data);
    let elapsed = clock.elapsed();
    info!(
        elapsed_ms = elapsed.as_millis() as u64,
        product, "sequential trial complete"
    );
    TrialReport {
        kind: TrialKind::Sequential,
        elapsed,
        product,
        coordination: None,
    }
}

/// Runs the sequential baseline, then each of `strategies` in order, all
/// sharing one state allocation that is reset before every threaded trial.
pub fn run_trials(data: &[i32], segments: &[Segment], strategies: &[Strategy]) -> Vec<TrialReport> {
    let shared = SharedState::new(segments.len());
    let mut reports = Vec::with_capacity(strategies.len() + 1);
    reports.push(run_sequential(data));
    for &strategy in strategies {
        reports.push(run_strategy(strategy, data, segments, &shared));
    }
    reports
}

/// Everything one invocation produced.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunReport {
    /// Validated parameters.
    pub config: RunConfig,
    /// Segment boundaries, in worker order.
    pub segments: Vec<Segment>,
    /// Segment owning the forced zero, if one was requested.
    pub zero_segment: Option<usize>,
    /// Sequential baseline followed by one report per strategy.
    pub trials: Vec<TrialReport>,
}

impl RunReport {
    /// Returns `true` if every threaded trial matched the sequential product.
    pub fn all_agree(&self) -> bool {
        let mut products = self.trials.iter().map(|t| t.product);
        match products.next() {
            Some(first) => products.all(|p| p == first),
            None => true,
        }
    }
}

/// Validates `config`, generates the input, partitions it, and runs the
/// baseline plus `strategies`.
///
/// # Errors
///
/// [`FindProdError::InvalidArgument`] for out-of-range parameters and
/// [`FindProdError::DegenerateSegment`] for more workers than elements. Both
/// are raised before any thread is spawned.
pub fn run(config: &RunConfig, strategies: &[Strategy]) -> Result<RunReport, FindProdError> {
    config.validate()?;
    let segments = partition(config.array_size, config.thread_count)?;
    let data = config.input_spec().generate()?;
    let zero_segment = config.zero_index.and_then(|idx| owner_of(&segments, idx));
    let trials = run_trials(&data, &segments, strategies);
    Ok(RunReport {
        config: *config,
        segments,
        zero_segment,
        trials,
    })
}
