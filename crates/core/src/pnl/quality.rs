//! Data-quality counts for rows the engine silently treats as zero.

use serde::{Deserialize, Serialize};

use super::types::{PnLInput, Recurrence};

/// Number of malformed rows per input table.
///
/// The engine never fails on these; the caller logs them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataQualityReport {
    /// Orders with an unparseable revenue or carrier pay.
    pub orders_missing_amount: usize,
    /// Orders without a date under the active recognition policy.
    pub orders_missing_date: usize,
    /// Trip expenses with no amount or date.
    pub malformed_trip_expenses: usize,
    /// Business expenses that cannot be prorated.
    pub malformed_business_expenses: usize,
    /// Fuel entries with no cost or date.
    pub malformed_fuel_entries: usize,
}

impl DataQualityReport {
    /// Counts malformed rows in `input`.
    #[must_use]
    pub fn assess(input: &PnLInput) -> Self {
        let orders_missing_amount = input
            .orders
            .iter()
            .filter(|o| o.revenue.is_none() || o.carrier_pay.is_none())
            .count();
        let orders_missing_date = input
            .orders
            .iter()
            .filter(|o| o.recognition_date(input.recognition).is_none())
            .count();
        let malformed_trip_expenses = input
            .trip_expenses
            .iter()
            .filter(|e| e.amount.is_none() || e.expense_date.is_none())
            .count();
        let malformed_business_expenses = input
            .business_expenses
            .iter()
            .filter(|e| {
                e.amount.is_none_or(|amount| amount.is_sign_negative())
                    || e.effective_from.is_none()
                    || e.recurrence == Recurrence::Unknown
                    || matches!(
                        (e.effective_from, e.effective_to),
                        (Some(from), Some(to)) if to < from
                    )
            })
            .count();
        let malformed_fuel_entries = input
            .fuel_entries
            .iter()
            .filter(|e| e.total_cost.is_none() || e.entry_date.is_none())
            .count();

        Self {
            orders_missing_amount,
            orders_missing_date,
            malformed_trip_expenses,
            malformed_business_expenses,
            malformed_fuel_entries,
        }
    }

    /// Total malformed rows across all tables.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.orders_missing_amount
            + self.orders_missing_date
            + self.malformed_trip_expenses
            + self.malformed_business_expenses
            + self.malformed_fuel_entries
    }

    /// Returns true if nothing was malformed.
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.total() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pnl::types::{BusinessExpenseRow, OrderRow, TripExpenseRow};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    #[test]
    fn test_clean_input() {
        let input = PnLInput::new(
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 1, 31).unwrap(),
        );
        assert!(DataQualityReport::assess(&input).is_clean());
    }

    #[test]
    fn test_counts_each_kind() {
        let day = NaiveDate::from_ymd_opt(2026, 1, 10).unwrap();
        let mut input = PnLInput::new(day, day);
        input.orders = vec![
            OrderRow {
                revenue: None,
                carrier_pay: Some(dec!(10)),
                delivered_at: Some(day),
                ..OrderRow::default()
            },
            OrderRow {
                revenue: Some(dec!(10)),
                carrier_pay: Some(dec!(5)),
                delivered_at: None,
                ..OrderRow::default()
            },
        ];
        input.trip_expenses = vec![TripExpenseRow::default()];
        input.business_expenses = vec![BusinessExpenseRow {
            recurrence: Recurrence::Monthly,
            amount: Some(dec!(100)),
            effective_from: Some(day),
            effective_to: Some(day.pred_opt().unwrap()),
            ..BusinessExpenseRow::default()
        }];

        let report = DataQualityReport::assess(&input);
        assert_eq!(report.orders_missing_amount, 1);
        assert_eq!(report.orders_missing_date, 1);
        assert_eq!(report.malformed_trip_expenses, 1);
        assert_eq!(report.malformed_business_expenses, 1);
        assert_eq!(report.malformed_fuel_entries, 0);
        assert_eq!(report.total(), 4);
        assert!(!report.is_clean());
    }
}
