//! Money calculation utilities using rust_decimal for precision
//!
//! Prices travel as `f64` on the wire; arithmetic is done with `Decimal`
//! and converted back for display.

use rust_decimal::prelude::*;

/// Monetary values are displayed with 2 decimal places, half-up
const DECIMAL_PLACES: u32 = 2;

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Whole-number percentage of `part` relative to `whole`, rounded half-up.
///
/// Returns 0 when `whole` is not positive.
pub fn percentage_of(part: f64, whole: f64) -> u32 {
    let whole = to_decimal(whole);
    if whole <= Decimal::ZERO {
        return 0;
    }
    (to_decimal(part) * Decimal::ONE_HUNDRED / whole)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u32()
        .unwrap_or_default()
}
