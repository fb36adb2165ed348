//! P&L statement and unit economics.
//!
//! Both functions are pure: no I/O, no shared state, and the same input
//! always produces the same output. Malformed rows count as zero.

use std::collections::BTreeMap;

use freightbook_shared::types::FuelAccounting;
use freightbook_shared::types::money::{MONEY_DP, percent_of, ratio, round_dp, round_money};
use rust_decimal::Decimal;

use super::proration::prorate_expense;
use super::types::{CategoryTotal, PnLInput, PnLOutput, TripExpenseCategory, UnitMetrics};

/// Sums decimals, skipping any term that would overflow.
fn checked_sum(values: impl Iterator<Item = Decimal>) -> Decimal {
    values.fold(Decimal::ZERO, |acc, value| acc.checked_add(value).unwrap_or(acc))
}

/// Folds period rows into a profit-and-loss statement.
///
/// Rows outside `[period_start, period_end]` are ignored even if the caller
/// passed them in. Each total is rounded to cents; gross profit is rounded
/// once after the full subtraction chain.
#[must_use]
pub fn calculate_pnl(input: &PnLInput) -> PnLOutput {
    let total_revenue = round_money(checked_sum(
        input
            .orders_in_period()
            .map(|o| o.revenue.unwrap_or_default()),
    ));
    let total_carrier_pay = round_money(checked_sum(
        input
            .orders_in_period()
            .map(|o| o.carrier_pay.unwrap_or_default()),
    ));

    let trip_totals = trip_expense_totals(input);
    let total_trip_expenses = round_money(checked_sum(trip_totals.values().copied()));

    let business_totals = business_expense_totals(input);
    let total_business_expenses = round_money(checked_sum(business_totals.values().copied()));

    let gross_profit = round_money(
        total_revenue
            .saturating_sub(total_carrier_pay)
            .saturating_sub(total_trip_expenses),
    );
    let net_profit = round_money(gross_profit.saturating_sub(total_business_expenses));

    let net_margin_pct = if total_revenue > Decimal::ZERO {
        percent_of(net_profit, total_revenue)
    } else {
        Decimal::ZERO
    };

    PnLOutput {
        period_start: input.period_start,
        period_end: input.period_end,
        total_revenue,
        total_carrier_pay,
        total_trip_expenses,
        total_business_expenses,
        gross_profit,
        net_profit,
        net_margin_pct,
        trip_expenses_by_category: trip_totals
            .into_iter()
            .map(|(category, amount)| CategoryTotal {
                category: category.as_str().to_string(),
                amount,
            })
            .collect(),
        business_expenses_by_category: business_totals
            .into_iter()
            .map(|(category, amount)| CategoryTotal { category, amount })
            .collect(),
    }
}

/// Derives per-load and per-mile figures from a period's rows and its P&L.
///
/// Every ratio resolves to zero when its denominator is zero.
#[must_use]
pub fn calculate_unit_metrics(input: &PnLInput, pnl: &PnLOutput) -> UnitMetrics {
    let load_count = u64::try_from(input.orders_in_period().count()).unwrap_or(u64::MAX);
    let loads = Decimal::from(load_count);

    let total_miles = round_dp(
        checked_sum(
            input
                .orders_in_period()
                .map(|o| o.distance_miles.unwrap_or_default()),
        ),
        MONEY_DP,
    );
    let total_fuel_gallons = round_dp(
        checked_sum(
            input
                .fuel_entries_in_period()
                .map(|e| e.gallons.unwrap_or_default()),
        ),
        MONEY_DP,
    );

    UnitMetrics {
        load_count,
        total_miles,
        revenue_per_load: ratio(pnl.total_revenue, loads, MONEY_DP),
        profit_per_load: ratio(pnl.net_profit, loads, MONEY_DP),
        revenue_per_mile: ratio(pnl.total_revenue, total_miles, MONEY_DP),
        profit_per_mile: ratio(pnl.net_profit, total_miles, MONEY_DP),
        total_fuel_gallons,
        fuel_cost_per_mile: ratio(
            pnl.trip_expense(TripExpenseCategory::Fuel),
            total_miles,
            MONEY_DP,
        ),
    }
}

/// In-period trip expenses by category, honoring the fuel accounting policy.
fn trip_expense_totals(input: &PnLInput) -> BTreeMap<TripExpenseCategory, Decimal> {
    let mut totals: BTreeMap<TripExpenseCategory, Decimal> = BTreeMap::new();

    for expense in input.trip_expenses_in_period() {
        if input.fuel_accounting == FuelAccounting::FuelLog
            && expense.category == TripExpenseCategory::Fuel
        {
            continue;
        }
        let entry = totals.entry(expense.category).or_default();
        *entry = entry
            .checked_add(expense.amount.unwrap_or_default())
            .unwrap_or(*entry);
    }

    if input.fuel_accounting == FuelAccounting::FuelLog {
        let fuel = checked_sum(
            input
                .fuel_entries_in_period()
                .map(|e| e.total_cost.unwrap_or_default()),
        );
        if !fuel.is_zero() {
            let entry = totals.entry(TripExpenseCategory::Fuel).or_default();
            *entry = entry.checked_add(fuel).unwrap_or(*entry);
        }
    }

    totals.into_iter().map(|(c, amount)| (c, round_money(amount))).collect()
}

/// Prorated business expenses by category label.
fn business_expense_totals(input: &PnLInput) -> BTreeMap<String, Decimal> {
    let mut totals: BTreeMap<String, Decimal> = BTreeMap::new();

    for expense in &input.business_expenses {
        let share = prorate_expense(expense, input.period_start, input.period_end);
        if share.is_zero() {
            continue;
        }
        let entry = totals
            .entry(expense.category_label().to_string())
            .or_default();
        *entry = entry.checked_add(share).unwrap_or(*entry);
    }

    totals
}
