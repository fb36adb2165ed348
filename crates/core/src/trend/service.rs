//! Trend composition.

use chrono::NaiveDate;
use freightbook_shared::types::TenantId;
use freightbook_shared::types::money::{percent_of, round_money};
use rayon::prelude::*;
use rust_decimal::Decimal;
use tracing::debug;

use super::error::TrendError;
use super::types::{MonthlyPnL, TrendReport, TrendSummary};
use crate::aggregator::PeriodAggregator;
use crate::period::ReportPeriod;
use crate::pnl::{PnLInput, calculate_pnl, calculate_unit_metrics};

/// Longest series served.
pub const MAX_TREND_MONTHS: u32 = 36;

/// The calendar months ending with `anchor`'s month, oldest first.
///
/// # Errors
///
/// Returns `InvalidMonths` unless `1 <= months <= MAX_TREND_MONTHS`.
pub fn trailing_windows(anchor: NaiveDate, months: u32) -> Result<Vec<ReportPeriod>, TrendError> {
    if months == 0 || months > MAX_TREND_MONTHS {
        return Err(TrendError::InvalidMonths {
            months,
            max: MAX_TREND_MONTHS,
        });
    }
    Ok(ReportPeriod::trailing_months(anchor, months))
}

/// Computes each month independently, in parallel, keeping input order.
#[must_use]
pub fn compose_trend(inputs: &[PnLInput]) -> TrendReport {
    let months: Vec<MonthlyPnL> = inputs
        .par_iter()
        .map(|input| {
            let pnl = calculate_pnl(input);
            let metrics = calculate_unit_metrics(input, &pnl);
            MonthlyPnL {
                month: input.period().label(),
                period: input.period(),
                pnl,
                metrics,
            }
        })
        .collect();

    let summary = summarize(&months);
    TrendReport { months, summary }
}

fn summarize(months: &[MonthlyPnL]) -> TrendSummary {
    let total_revenue = round_money(
        months
            .iter()
            .map(|m| m.pnl.total_revenue)
            .fold(Decimal::ZERO, Decimal::saturating_add),
    );
    let total_net_profit = round_money(
        months
            .iter()
            .map(|m| m.pnl.net_profit)
            .fold(Decimal::ZERO, Decimal::saturating_add),
    );

    let mut best: Option<&MonthlyPnL> = None;
    let mut worst: Option<&MonthlyPnL> = None;
    for month in months {
        if best.is_none_or(|b| month.pnl.net_profit > b.pnl.net_profit) {
            best = Some(month);
        }
        if worst.is_none_or(|w| month.pnl.net_profit < w.pnl.net_profit) {
            worst = Some(month);
        }
    }

    TrendSummary {
        total_revenue,
        total_net_profit,
        net_margin_pct: if total_revenue > Decimal::ZERO {
            percent_of(total_net_profit, total_revenue)
        } else {
            Decimal::ZERO
        },
        best_month: best.map(|m| m.month.clone()),
        worst_month: worst.map(|m| m.month.clone()),
    }
}

/// Fetches the trailing months concurrently and composes the series.
///
/// # Errors
///
/// Returns `InvalidMonths` for an out-of-range count, or the first month's
/// aggregation failure.
pub async fn monthly_trend(
    aggregator: &PeriodAggregator,
    tenant_id: TenantId,
    anchor: NaiveDate,
    months: u32,
) -> Result<TrendReport, TrendError> {
    let windows = trailing_windows(anchor, months)?;
    let inputs = aggregator.fetch_trend(tenant_id, &windows).await?;
    debug!(tenant_id = %tenant_id, %anchor, months, "Trend inputs gathered");
    Ok(compose_trend(&inputs))
}
