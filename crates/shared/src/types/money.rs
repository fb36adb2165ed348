//! Money rounding with decimal precision.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Every financial figure in Freightbook goes through these helpers.

use rust_decimal::{Decimal, RoundingStrategy};

/// Fractional digits kept for monetary amounts (cents).
pub const MONEY_DP: u32 = 2;

/// Fractional digits kept for percentages (e.g. `21.7`).
pub const PERCENT_DP: u32 = 1;

/// Collapses negative zero (e.g. `-0.00`) into plain zero.
#[must_use]
pub fn clean_zero(value: Decimal) -> Decimal {
    if value.is_zero() { Decimal::ZERO } else { value }
}

/// Rounds to `dp` decimal places using Banker's Rounding (MidpointNearestEven).
#[must_use]
pub fn round_dp(value: Decimal, dp: u32) -> Decimal {
    clean_zero(value.round_dp_with_strategy(dp, RoundingStrategy::MidpointNearestEven))
}

/// Rounds a monetary amount to cents.
#[must_use]
pub fn round_money(value: Decimal) -> Decimal {
    round_dp(value, MONEY_DP)
}

/// Divides and rounds to `dp` places, resolving a zero denominator to zero.
#[must_use]
pub fn ratio(numerator: Decimal, denominator: Decimal, dp: u32) -> Decimal {
    if denominator.is_zero() {
        return Decimal::ZERO;
    }
    numerator
        .checked_div(denominator)
        .map_or(Decimal::ZERO, |value| round_dp(value, dp))
}

/// Expresses `part` as a percentage of `whole`, rounded to one decimal place.
///
/// Returns zero when `whole` is zero.
#[must_use]
pub fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        return Decimal::ZERO;
    }
    part.checked_div(whole)
        .and_then(|share| share.checked_mul(Decimal::ONE_HUNDRED))
        .map_or(Decimal::ZERO, |value| round_dp(value, PERCENT_DP))
}
