// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Modular multiplication and the final combine step.

use crate::constants::MODULUS;
use crate::shared::SharedState;

/// Multiplies `acc` by `x` and reduces into `[0, MODULUS)`.
///
/// The widened `i64` product cannot overflow: `acc` is already a residue and
/// `x` is an `i32`. `rem_euclid` keeps results canonical for negative inputs,
/// which makes the fold order-independent.
#[inline]
pub fn mod_mul(acc: i32, x: i32) -> i32 {
    (i64::from(acc) * i64::from(x)).rem_euclid(MODULUS) as i32
}

/// Combines per-segment products into the final modular product.
pub fn aggregate_products(products: &[i32]) -> i32 {
    products.iter().fold(1, |acc, &p| mod_mul(acc, p))
}

/// Combines every result slot of `shared`, cancelled or not.
///
/// A cancelled worker never publishes, so its slot still holds the identity
/// and contributes nothing. Cancellation is only issued after some slot
/// published 0, so the aggregate of a cancelled round is 0 either way.
pub fn aggregate(shared: &SharedState) -> i32 {
    aggregate_products(&shared.products())
}
