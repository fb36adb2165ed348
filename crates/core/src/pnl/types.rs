//! P&L input rows and derived results.

use chrono::NaiveDate;
use freightbook_shared::types::{DispatcherId, FuelAccounting, OrderId, RecognitionPolicy};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::lenient;
use crate::period::ReportPeriod;

/// Lifecycle status of a transport order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Booked but not yet assigned.
    Pending,
    /// Assigned to a driver or carrier.
    Assigned,
    /// On the road.
    InTransit,
    /// Delivered to the consignee.
    #[default]
    Delivered,
    /// Invoiced to the customer.
    Invoiced,
    /// Paid by the customer.
    Paid,
    /// Cancelled.
    Cancelled,
    /// Any status this version does not know about.
    #[serde(other)]
    Unknown,
}

/// One transport order (load).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderRow {
    /// Order ID, if known.
    #[serde(default, deserialize_with = "lenient::id")]
    pub order_id: Option<OrderId>,
    /// Revenue billed to the customer.
    #[serde(default, deserialize_with = "lenient::amount")]
    pub revenue: Option<Decimal>,
    /// Amount paid out for hauling the load.
    #[serde(default, deserialize_with = "lenient::amount")]
    pub carrier_pay: Option<Decimal>,
    /// Loaded distance in miles.
    #[serde(default, deserialize_with = "lenient::amount")]
    pub distance_miles: Option<Decimal>,
    /// Order status.
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub status: OrderStatus,
    /// Creation date.
    #[serde(default, deserialize_with = "lenient::date")]
    pub created_at: Option<NaiveDate>,
    /// Delivery date.
    #[serde(default, deserialize_with = "lenient::date")]
    pub delivered_at: Option<NaiveDate>,
    /// Invoice date.
    #[serde(default, deserialize_with = "lenient::date")]
    pub invoice_date: Option<NaiveDate>,
    /// Dispatcher who booked the load.
    #[serde(default, deserialize_with = "lenient::id")]
    pub dispatcher_id: Option<DispatcherId>,
    /// Dispatcher display name.
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub dispatcher_name: Option<String>,
}

impl OrderRow {
    /// Returns true for cancelled orders, which carry no revenue or cost.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.status == OrderStatus::Cancelled
    }

    /// The date that decides which period this order is counted in.
    #[must_use]
    pub fn recognition_date(&self, policy: RecognitionPolicy) -> Option<NaiveDate> {
        match policy {
            RecognitionPolicy::DeliveryDate => self.delivered_at,
            RecognitionPolicy::InvoiceDate => self.invoice_date,
            RecognitionPolicy::CreatedDate => self.created_at,
        }
    }
}

/// Category of a variable, trip-level cost.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum TripExpenseCategory {
    /// Diesel, DEF, reefer fuel.
    Fuel,
    /// Road, bridge, and tunnel tolls.
    Tolls,
    /// Roadside repairs.
    Repairs,
    /// Driver lodging.
    Lodging,
    /// Everything else, including unrecognized categories.
    #[default]
    #[serde(other)]
    Misc,
}

impl TripExpenseCategory {
    /// Stable snake_case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fuel => "fuel",
            Self::Tolls => "tolls",
            Self::Repairs => "repairs",
            Self::Lodging => "lodging",
            Self::Misc => "misc",
        }
    }
}

/// A variable cost tied to a specific trip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TripExpenseRow {
    /// Expense category.
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub category: TripExpenseCategory,
    /// Amount spent.
    #[serde(default, deserialize_with = "lenient::amount")]
    pub amount: Option<Decimal>,
    /// Date the expense was incurred.
    #[serde(default, deserialize_with = "lenient::date")]
    pub expense_date: Option<NaiveDate>,
}

/// Billing cycle of a business expense.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recurrence {
    /// Billed every month.
    Monthly,
    /// Billed every quarter.
    Quarterly,
    /// Billed once a year.
    #[serde(alias = "yearly")]
    Annual,
    /// Recognized in full on its effective date.
    #[serde(alias = "one-time", alias = "once")]
    OneTime,
    /// Missing or unrecognized cycle; contributes nothing.
    #[default]
    #[serde(other)]
    Unknown,
}

/// A fixed or recurring overhead cost not tied to any single load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BusinessExpenseRow {
    /// Free-form category (insurance, rent, software, maintenance...).
    #[serde(default, deserialize_with = "lenient::text")]
    pub category: String,
    /// Billing cycle.
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub recurrence: Recurrence,
    /// Nominal amount per cycle.
    #[serde(default, deserialize_with = "lenient::amount")]
    pub amount: Option<Decimal>,
    /// First day the expense applies.
    #[serde(default, deserialize_with = "lenient::date")]
    pub effective_from: Option<NaiveDate>,
    /// Last day the expense applies; `None` means still active.
    #[serde(default, deserialize_with = "lenient::date")]
    pub effective_to: Option<NaiveDate>,
}

impl BusinessExpenseRow {
    /// Category name used in breakdowns.
    #[must_use]
    pub fn category_label(&self) -> &str {
        let trimmed = self.category.trim();
        if trimmed.is_empty() {
            "uncategorized"
        } else {
            trimmed
        }
    }
}

/// A fuel purchase from the fuel log.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FuelEntryRow {
    /// Total cost of the purchase.
    #[serde(default, deserialize_with = "lenient::amount")]
    pub total_cost: Option<Decimal>,
    /// Gallons purchased.
    #[serde(default, deserialize_with = "lenient::amount")]
    pub gallons: Option<Decimal>,
    /// Purchase date.
    #[serde(default, deserialize_with = "lenient::date")]
    pub entry_date: Option<NaiveDate>,
}

/// Period-scoped rows feeding the P&L engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PnLInput {
    /// First day of the reporting period.
    pub period_start: NaiveDate,
    /// Last day of the reporting period (inclusive).
    pub period_end: NaiveDate,
    /// Orders recognized in the period.
    #[serde(default)]
    pub orders: Vec<OrderRow>,
    /// Trip expenses incurred in the period.
    #[serde(default)]
    pub trip_expenses: Vec<TripExpenseRow>,
    /// Business expenses whose effective range overlaps the period.
    #[serde(default)]
    pub business_expenses: Vec<BusinessExpenseRow>,
    /// Fuel log entries in the period.
    #[serde(default)]
    pub fuel_entries: Vec<FuelEntryRow>,
    /// Order date that governs period inclusion.
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub recognition: RecognitionPolicy,
    /// Source of fuel cost.
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub fuel_accounting: FuelAccounting,
}

impl PnLInput {
    /// Creates an empty input for the given period.
    #[must_use]
    pub fn new(period_start: NaiveDate, period_end: NaiveDate) -> Self {
        Self {
            period_start,
            period_end,
            ..Self::default()
        }
    }

    /// The reporting period.
    #[must_use]
    pub const fn period(&self) -> ReportPeriod {
        ReportPeriod::new(self.period_start, self.period_end)
    }

    /// Orders whose recognition date falls inside the period.
    ///
    /// Cancelled orders never count, whatever dates they carry.
    pub fn orders_in_period(&self) -> impl Iterator<Item = &OrderRow> {
        let period = self.period();
        let policy = self.recognition;
        self.orders.iter().filter(move |order| {
            !order.is_cancelled()
                && order
                    .recognition_date(policy)
                    .is_some_and(|date| period.contains(date))
        })
    }

    /// Trip expenses dated inside the period.
    pub fn trip_expenses_in_period(&self) -> impl Iterator<Item = &TripExpenseRow> {
        let period = self.period();
        self.trip_expenses.iter().filter(move |expense| {
            expense
                .expense_date
                .is_some_and(|date| period.contains(date))
        })
    }

    /// Fuel entries dated inside the period.
    pub fn fuel_entries_in_period(&self) -> impl Iterator<Item = &FuelEntryRow> {
        let period = self.period();
        self.fuel_entries
            .iter()
            .filter(move |entry| entry.entry_date.is_some_and(|date| period.contains(date)))
    }
}

/// Total for one expense category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
    /// Category name.
    pub category: String,
    /// Amount attributed to the period.
    pub amount: Decimal,
}

/// Profit-and-loss statement for one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PnLOutput {
    /// Period start date.
    pub period_start: NaiveDate,
    /// Period end date.
    pub period_end: NaiveDate,
    /// Revenue from orders recognized in the period.
    pub total_revenue: Decimal,
    /// Carrier pay for those orders.
    pub total_carrier_pay: Decimal,
    /// Trip-level variable costs.
    pub total_trip_expenses: Decimal,
    /// Business expenses prorated into the period.
    pub total_business_expenses: Decimal,
    /// Revenue minus carrier pay minus trip expenses.
    pub gross_profit: Decimal,
    /// Gross profit minus business expenses.
    pub net_profit: Decimal,
    /// Net profit as a percentage of revenue (one decimal place).
    pub net_margin_pct: Decimal,
    /// Trip expenses by category.
    pub trip_expenses_by_category: Vec<CategoryTotal>,
    /// Prorated business expenses by category.
    pub business_expenses_by_category: Vec<CategoryTotal>,
}

impl PnLOutput {
    /// Amount booked under a trip expense category, zero if absent.
    #[must_use]
    pub fn trip_expense(&self, category: TripExpenseCategory) -> Decimal {
        self.trip_expenses_by_category
            .iter()
            .find(|total| total.category == category.as_str())
            .map_or(Decimal::ZERO, |total| total.amount)
    }
}

/// Per-load and per-mile economics for one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitMetrics {
    /// Number of loads recognized in the period.
    pub load_count: u64,
    /// Total loaded miles.
    pub total_miles: Decimal,
    /// Revenue per load.
    pub revenue_per_load: Decimal,
    /// Net profit per load.
    pub profit_per_load: Decimal,
    /// Revenue per mile.
    pub revenue_per_mile: Decimal,
    /// Net profit per mile.
    pub profit_per_mile: Decimal,
    /// Gallons purchased in the period.
    pub total_fuel_gallons: Decimal,
    /// Fuel cost per mile.
    pub fuel_cost_per_mile: Decimal,
}
