// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Fixed limits and defaults shared by the library and the CLI.

/// Modulus applied after every multiplication.
///
/// Prime, and small enough that `(MODULUS - 1) * i32::MAX` fits in `i64`,
/// so a residue times any element never overflows the widened product.
pub const MODULUS: i64 = 9973;

/// Largest accepted array length.
pub const MAX_SIZE: usize = 100_000_000;

/// Largest accepted worker count.
pub const MAX_THREADS: usize = 16;

/// Seed used by the input generator when none is configured.
pub const DEFAULT_SEED: u64 = 7649;

/// Upper bound (inclusive) for generated elements when none is configured.
pub const DEFAULT_MAX_RANDOM: i32 = 3000;

/// Number of elements a worker multiplies between two cancellation checks.
pub const CANCEL_CHECK_STRIDE: usize = 4096;

const _: () = assert!(CANCEL_CHECK_STRIDE > 0, "stride must be non-zero");
