// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use crate::aggregate::mod_mul;

/// Serial baseline: product of `data` modulo [`MODULUS`](crate::MODULUS).
///
/// Returns 0 as soon as a zero element is seen; the rest is not scanned.
pub fn sequential_product(data: &[i32]) -> i32 {
    let mut product = 1;
    for &x in data {
        if x == 0 {
            return 0;
        }
        product = mod_mul(product, x);
    }
    product
}
