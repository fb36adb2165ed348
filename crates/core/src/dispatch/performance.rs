//! Per-dispatcher revenue and margin for a period.

use std::collections::BTreeMap;

use freightbook_shared::types::money::{MONEY_DP, percent_of, ratio, round_dp, round_money};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::pnl::PnLInput;

/// Key used for orders without a dispatcher.
pub const UNASSIGNED_DISPATCHER: &str = "unassigned";

/// Performance figures for one dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatcherPerformance {
    /// Dispatcher ID, or `unassigned`.
    pub dispatcher_id: String,
    /// Display name, when any order carried one.
    pub dispatcher_name: Option<String>,
    /// Loads booked in the period.
    pub load_count: u64,
    /// Revenue of those loads.
    pub total_revenue: Decimal,
    /// Carrier pay of those loads.
    pub total_carrier_pay: Decimal,
    /// Revenue minus carrier pay.
    pub margin: Decimal,
    /// Margin as a percentage of revenue.
    pub margin_pct: Decimal,
    /// Loaded miles.
    pub total_miles: Decimal,
    /// Revenue per loaded mile.
    pub revenue_per_mile: Decimal,
}

#[derive(Default)]
struct Tally {
    name: Option<String>,
    loads: u64,
    revenue: Decimal,
    carrier_pay: Decimal,
    miles: Decimal,
}

/// Groups the period's orders by dispatcher.
///
/// Sorted by revenue descending, ties broken by dispatcher ID.
#[must_use]
pub fn calculate_dispatcher_performance(input: &PnLInput) -> Vec<DispatcherPerformance> {
    let mut tallies: BTreeMap<String, Tally> = BTreeMap::new();

    for order in input.orders_in_period() {
        let key = order
            .dispatcher_id
            .map_or_else(|| UNASSIGNED_DISPATCHER.to_string(), |id| id.to_string());
        let tally = tallies.entry(key).or_default();

        if tally.name.is_none() {
            tally.name.clone_from(&order.dispatcher_name);
        }
        tally.loads += 1;
        tally.revenue = tally.revenue.saturating_add(order.revenue.unwrap_or_default());
        tally.carrier_pay = tally
            .carrier_pay
            .saturating_add(order.carrier_pay.unwrap_or_default());
        tally.miles = tally
            .miles
            .saturating_add(order.distance_miles.unwrap_or_default());
    }

    let mut rows: Vec<DispatcherPerformance> = tallies
        .into_iter()
        .map(|(dispatcher_id, tally)| {
            let revenue = round_money(tally.revenue);
            let carrier_pay = round_money(tally.carrier_pay);
            let margin = round_money(revenue.saturating_sub(carrier_pay));
            let miles = round_dp(tally.miles, MONEY_DP);
            DispatcherPerformance {
                dispatcher_id,
                dispatcher_name: tally.name,
                load_count: tally.loads,
                total_revenue: revenue,
                total_carrier_pay: carrier_pay,
                margin,
                margin_pct: percent_of(margin, revenue),
                total_miles: miles,
                revenue_per_mile: ratio(revenue, miles, MONEY_DP),
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        b.total_revenue
            .cmp(&a.total_revenue)
            .then_with(|| a.dispatcher_id.cmp(&b.dispatcher_id))
    });
    rows
}
