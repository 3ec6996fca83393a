//! Exact fraction-to-percent conversion.
//!
//! No rounding happens anywhere: `n/d` becomes `floor(100n/d)` plus the
//! remainder over `d`, reduced to lowest terms.

use crate::model::MixedPercent;

/// Greatest common divisor, with `gcd(a, 0) == a`.
#[must_use]
pub fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let t = b;
        b = a % b;
        a = t;
    }
    a
}

/// Convert `numerator / denominator` into an exact mixed-number percent.
///
/// Expects `denominator >= 1`. A zero denominator yields `0%` rather than
/// panicking. The product `numerator * 100` is taken in `u128`, so every
/// `u64` numerator stays exact.
#[must_use]
pub fn format_percent(numerator: u64, denominator: u64) -> MixedPercent {
    if denominator == 0 {
        return MixedPercent::exact(0);
    }
    let total = u128::from(numerator) * 100;
    let whole = total / u128::from(denominator);
    // remainder < denominator, so it fits back into u64
    let remainder = (total % u128::from(denominator)) as u64;
    MixedPercent::new(whole, remainder, denominator)
}
