//! Trend data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::period::ReportPeriod;
use crate::pnl::{PnLOutput, UnitMetrics};

/// One month of the series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyPnL {
    /// Month label, e.g. `2026-04`.
    pub month: String,
    /// Month bounds.
    pub period: ReportPeriod,
    /// P&L statement for the month.
    pub pnl: PnLOutput,
    /// Unit economics for the month.
    pub metrics: UnitMetrics,
}

/// Totals across the whole series.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendSummary {
    /// Sum of monthly revenue.
    pub total_revenue: Decimal,
    /// Sum of monthly net profit.
    pub total_net_profit: Decimal,
    /// Net profit over revenue for the whole series (one decimal place).
    pub net_margin_pct: Decimal,
    /// Month with the highest net profit (earliest on ties).
    pub best_month: Option<String>,
    /// Month with the lowest net profit (earliest on ties).
    pub worst_month: Option<String>,
}

/// Monthly series, oldest first, with a summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendReport {
    /// Monthly entries, oldest first.
    pub months: Vec<MonthlyPnL>,
    /// Series totals.
    pub summary: TrendSummary,
}
