//! Attribution of recurring business expenses to arbitrary reporting periods.

use chrono::NaiveDate;
use freightbook_shared::types::money::round_money;
use rust_decimal::Decimal;

use super::types::{BusinessExpenseRow, Recurrence};
use crate::period::ReportPeriod;

/// Average days per month (365.25 / 12).
pub const DAYS_PER_MONTH: Decimal = Decimal::from_parts(304_375, 0, 0, false, 4);

/// Average days per quarter (365.25 / 4).
pub const DAYS_PER_QUARTER: Decimal = Decimal::from_parts(913_125, 0, 0, false, 4);

/// Average days per year, leap years included.
pub const DAYS_PER_YEAR: Decimal = Decimal::from_parts(36_525, 0, 0, false, 2);

/// Length in days of one billing cycle, or `None` for non-prorated expenses.
#[must_use]
pub const fn cycle_days(recurrence: Recurrence) -> Option<Decimal> {
    match recurrence {
        Recurrence::Monthly => Some(DAYS_PER_MONTH),
        Recurrence::Quarterly => Some(DAYS_PER_QUARTER),
        Recurrence::Annual => Some(DAYS_PER_YEAR),
        Recurrence::OneTime | Recurrence::Unknown => None,
    }
}

/// Computes how much of `expense` belongs to `[period_start, period_end]`.
///
/// Recurring expenses accrue at a daily rate over the days their effective
/// range shares with the period. One-time expenses are recognized in full in
/// the period containing their `effective_from` date and are never split.
///
/// The result is rounded to cents and never negative. Invalid records
/// (missing amount or start date, negative amount, `effective_to` before
/// `effective_from`, unknown recurrence) and inverted periods contribute zero.
#[must_use]
pub fn prorate_expense(
    expense: &BusinessExpenseRow,
    period_start: NaiveDate,
    period_end: NaiveDate,
) -> Decimal {
    let period = ReportPeriod::new(period_start, period_end);

    let (Some(amount), Some(effective_from)) = (expense.amount, expense.effective_from) else {
        return Decimal::ZERO;
    };
    if amount.is_sign_negative() || !period.is_valid() {
        return Decimal::ZERO;
    }
    if expense.effective_to.is_some_and(|to| to < effective_from) {
        return Decimal::ZERO;
    }

    let Some(overlap) = period.overlap(effective_from, expense.effective_to) else {
        return Decimal::ZERO;
    };

    if expense.recurrence == Recurrence::OneTime {
        return if period.contains(effective_from) {
            round_money(amount)
        } else {
            Decimal::ZERO
        };
    }

    let Some(cycle) = cycle_days(expense.recurrence) else {
        return Decimal::ZERO;
    };

    // amount * days / cycle keeps full precision until the final rounding
    amount
        .checked_mul(Decimal::from(overlap.day_count()))
        .and_then(|accrued| accrued.checked_div(cycle))
        .map_or(Decimal::ZERO, round_money)
}
