// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! findprod-core: segmented modular product over a shared integer array.
//!
//! The array is split into contiguous segments, one scoped worker thread per
//! segment computes its local product modulo [`MODULUS`], and the parent
//! learns about completion through one of three interchangeable coordinators:
//!
//! - [`Strategy::Join`]: join every worker in creation order.
//! - [`Strategy::Poll`]: spin over the published result slots and bail out
//!   the moment a zero shows up.
//! - [`Strategy::Counted`]: block on a [`CompletionLatch`] that the last
//!   finisher (or any zero finder) signals.
//!
//! [`sequential_product`] is the single-threaded oracle every strategy is
//! checked against.
#![forbid(unsafe_code)]

mod aggregate;
mod config;
mod constants;
/// Completion coordinators (join, poll, counted-signal).
pub mod coord;
mod error;
mod input;
mod latch;
mod partition;
mod sequential;
mod shared;
mod timing;
mod trial;
mod worker;

pub use aggregate::{aggregate, aggregate_products, mod_mul};
pub use config::RunConfig;
pub use constants::{
    CANCEL_CHECK_STRIDE, DEFAULT_MAX_RANDOM, DEFAULT_SEED, MAX_SIZE, MAX_THREADS, MODULUS,
};
pub use coord::{coordinate, Coordination, Strategy};
pub use error::FindProdError;
pub use input::InputSpec;
pub use latch::CompletionLatch;
pub use partition::{partition, Segment};
pub use sequential::sequential_product;
pub use shared::{SharedState, WorkerState};
pub use timing::Stopwatch;
pub use trial::{
    run, run_sequential, run_strategy, run_trials, RunReport, TrialKind, TrialReport,
};
pub use worker::{run_segment, segment_product, CompletionAction, SegmentOutcome};
