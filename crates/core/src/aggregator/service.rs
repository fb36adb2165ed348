//! Period aggregation service.

use std::sync::Arc;

use chrono::NaiveDate;
use freightbook_shared::config::ReportingConfig;
use freightbook_shared::types::{FuelAccounting, RecognitionPolicy, TenantId};
use futures::future::try_join_all;
use tracing::{debug, warn};

use super::error::AggregationError;
use super::source::PeriodDataSource;
use crate::period::ReportPeriod;
use crate::pnl::{DataQualityReport, PnLInput};
use crate::receivables::InvoiceRow;

/// Reporting policies applied to every aggregated period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregationSettings {
    /// Order date that governs period inclusion.
    pub recognition: RecognitionPolicy,
    /// Source of fuel cost.
    pub fuel_accounting: FuelAccounting,
}

impl From<&ReportingConfig> for AggregationSettings {
    fn from(config: &ReportingConfig) -> Self {
        Self {
            recognition: config.recognition,
            fuel_accounting: config.fuel_accounting,
        }
    }
}

/// Gathers period rows from a data source into engine inputs.
#[derive(Clone)]
pub struct PeriodAggregator {
    source: Arc<dyn PeriodDataSource>,
    settings: AggregationSettings,
}

impl PeriodAggregator {
    /// Creates an aggregator over `source`.
    #[must_use]
    pub fn new(source: Arc<dyn PeriodDataSource>, settings: AggregationSettings) -> Self {
        Self { source, settings }
    }

    /// Fetches every row set for `period` concurrently and builds the engine input.
    ///
    /// All four fetches must succeed; the first failure aborts the rest.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDateRange` for an inverted period, or whatever error the
    /// data source reports.
    pub async fn fetch_period_data(
        &self,
        tenant_id: TenantId,
        period: ReportPeriod,
    ) -> Result<PnLInput, AggregationError> {
        if !period.is_valid() {
            return Err(AggregationError::InvalidDateRange {
                start: period.start,
                end: period.end,
            });
        }

        let source = self.source.as_ref();
        let (orders, trip_expenses, business_expenses, fuel_entries) = tokio::try_join!(
            source.fetch_orders(tenant_id, period, self.settings.recognition),
            source.fetch_trip_expenses(tenant_id, period),
            source.fetch_business_expenses(tenant_id, period),
            source.fetch_fuel_entries(tenant_id, period)
        )?;

        let input = PnLInput {
            period_start: period.start,
            period_end: period.end,
            orders,
            trip_expenses,
            business_expenses,
            fuel_entries,
            recognition: self.settings.recognition,
            fuel_accounting: self.settings.fuel_accounting,
        };

        let quality = DataQualityReport::assess(&input);
        if !quality.is_clean() {
            warn!(
                tenant_id = %tenant_id,
                period = %period,
                orders_missing_amount = quality.orders_missing_amount,
                orders_missing_date = quality.orders_missing_date,
                malformed_trip_expenses = quality.malformed_trip_expenses,
                malformed_business_expenses = quality.malformed_business_expenses,
                malformed_fuel_entries = quality.malformed_fuel_entries,
                "Period data contains malformed rows"
            );
        }

        debug!(
            tenant_id = %tenant_id,
            period = %period,
            orders = input.orders.len(),
            trip_expenses = input.trip_expenses.len(),
            business_expenses = input.business_expenses.len(),
            fuel_entries = input.fuel_entries.len(),
            "Period data aggregated"
        );

        Ok(input)
    }

    /// Fetches inputs for several windows concurrently, preserving order.
    ///
    /// # Errors
    ///
    /// Fails if any window fails.
    pub async fn fetch_trend(
        &self,
        tenant_id: TenantId,
        windows: &[ReportPeriod],
    ) -> Result<Vec<PnLInput>, AggregationError> {
        try_join_all(
            windows
                .iter()
                .map(|period| self.fetch_period_data(tenant_id, *period)),
        )
        .await
    }

    /// Fetches invoices still open as of `as_of`.
    ///
    /// # Errors
    ///
    /// Returns whatever error the data source reports.
    pub async fn fetch_open_invoices(
        &self,
        tenant_id: TenantId,
        as_of: NaiveDate,
    ) -> Result<Vec<InvoiceRow>, AggregationError> {
        let invoices = self.source.fetch_open_invoices(tenant_id, as_of).await?;
        debug!(tenant_id = %tenant_id, %as_of, invoices = invoices.len(), "Open invoices fetched");
        Ok(invoices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::memory::{InMemoryDataSource, TenantSnapshot};
    use crate::pnl::{
        BusinessExpenseRow, FuelEntryRow, OrderRow, Recurrence, TripExpenseCategory,
        TripExpenseRow, calculate_pnl,
    };
    use rust_decimal_macros::dec;
    use std::time::Duration;
    use tokio::sync::Barrier;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn april() -> ReportPeriod {
        ReportPeriod::new(date(2026, 4, 1), date(2026, 4, 30))
    }

    fn snapshot() -> TenantSnapshot {
        TenantSnapshot {
            orders: vec![
                OrderRow {
                    revenue: Some(dec!(2000)),
                    carrier_pay: Some(dec!(1500)),
                    delivered_at: Some(date(2026, 3, 15)),
                    ..OrderRow::default()
                },
                OrderRow {
                    revenue: Some(dec!(3000)),
                    carrier_pay: Some(dec!(1900)),
                    delivered_at: Some(date(2026, 4, 10)),
                    ..OrderRow::default()
                },
            ],
            trip_expenses: vec![TripExpenseRow {
                category: TripExpenseCategory::Tolls,
                amount: Some(dec!(150)),
                expense_date: Some(date(2026, 4, 12)),
            }],
            business_expenses: vec![BusinessExpenseRow {
                category: "insurance".to_string(),
                recurrence: Recurrence::Monthly,
                amount: Some(dec!(608.75)),
                effective_from: Some(date(2026, 1, 1)),
                effective_to: None,
            }],
            fuel_entries: vec![FuelEntryRow {
                total_cost: Some(dec!(400)),
                gallons: Some(dec!(100)),
                entry_date: Some(date(2026, 4, 3)),
            }],
            invoices: Vec::new(),
        }
    }

    fn aggregator(tenant: TenantId) -> PeriodAggregator {
        let source = InMemoryDataSource::new().with_tenant(tenant, snapshot());
        PeriodAggregator::new(Arc::new(source), AggregationSettings::default())
    }

    #[tokio::test]
    async fn test_fetch_period_data_scopes_rows() {
        let tenant = TenantId::new();
        let input = aggregator(tenant)
            .fetch_period_data(tenant, april())
            .await
            .unwrap();

        assert_eq!(input.period(), april());
        assert_eq!(input.orders.len(), 1);
        assert_eq!(input.trip_expenses.len(), 1);
        assert_eq!(input.business_expenses.len(), 1);
        assert_eq!(input.fuel_entries.len(), 1);

        let pnl = calculate_pnl(&input);
        assert_eq!(pnl.total_revenue, dec!(3000));
        // 608.75 * 30 / 30.4375
        assert_eq!(pnl.total_business_expenses, dec!(600.00));
    }

    #[tokio::test]
    async fn test_inverted_period_rejected() {
        let tenant = TenantId::new();
        let period = ReportPeriod::new(date(2026, 4, 30), date(2026, 4, 1));
        let result = aggregator(tenant).fetch_period_data(tenant, period).await;
        assert!(matches!(
            result,
            Err(AggregationError::InvalidDateRange { .. })
        ));
    }

    #[tokio::test]
    async fn test_unknown_tenant_fails_whole_aggregation() {
        let result = aggregator(TenantId::new())
            .fetch_period_data(TenantId::new(), april())
            .await;
        assert!(matches!(result, Err(AggregationError::TenantNotFound(_))));
    }

    #[tokio::test]
    async fn test_fetch_trend_preserves_window_order() {
        let tenant = TenantId::new();
        let windows = ReportPeriod::trailing_months(date(2026, 4, 18), 3);

        let inputs = aggregator(tenant)
            .fetch_trend(tenant, &windows)
            .await
            .unwrap();

        assert_eq!(inputs.len(), 3);
        assert_eq!(inputs[0].period_start, date(2026, 2, 1));
        assert_eq!(inputs[1].orders.len(), 1);
        assert_eq!(inputs[2].period_start, date(2026, 4, 1));
        assert_eq!(inputs[2].orders.len(), 1);
    }

    /// A source whose fetches only complete once all four are in flight.
    struct BarrierSource {
        barrier: Barrier,
    }

    #[async_trait::async_trait]
    impl PeriodDataSource for BarrierSource {
        async fn fetch_orders(
            &self,
            _tenant_id: TenantId,
            _period: ReportPeriod,
            _recognition: RecognitionPolicy,
        ) -> Result<Vec<OrderRow>, AggregationError> {
            self.barrier.wait().await;
            Ok(Vec::new())
        }

        async fn fetch_trip_expenses(
            &self,
            _tenant_id: TenantId,
            _period: ReportPeriod,
        ) -> Result<Vec<TripExpenseRow>, AggregationError> {
            self.barrier.wait().await;
            Ok(Vec::new())
        }

        async fn fetch_business_expenses(
            &self,
            _tenant_id: TenantId,
            _period: ReportPeriod,
        ) -> Result<Vec<BusinessExpenseRow>, AggregationError> {
            self.barrier.wait().await;
            Ok(Vec::new())
        }

        async fn fetch_fuel_entries(
            &self,
            _tenant_id: TenantId,
            _period: ReportPeriod,
        ) -> Result<Vec<FuelEntryRow>, AggregationError> {
            self.barrier.wait().await;
            Ok(Vec::new())
        }

        async fn fetch_open_invoices(
            &self,
            _tenant_id: TenantId,
            _as_of: NaiveDate,
        ) -> Result<Vec<InvoiceRow>, AggregationError> {
            Err(AggregationError::DataSource("not supported".to_string()))
        }
    }

    #[tokio::test]
    async fn test_fetches_run_concurrently() {
        let source = BarrierSource {
            barrier: Barrier::new(4),
        };
        let aggregator = PeriodAggregator::new(Arc::new(source), AggregationSettings::default());

        let result = tokio::time::timeout(
            Duration::from_secs(5),
            aggregator.fetch_period_data(TenantId::new(), april()),
        )
        .await;

        let input = result.expect("fetches were serialized").unwrap();
        assert!(input.orders.is_empty());
    }

    #[tokio::test]
    async fn test_data_source_error_propagates() {
        let source = BarrierSource {
            barrier: Barrier::new(4),
        };
        let aggregator = PeriodAggregator::new(Arc::new(source), AggregationSettings::default());

        let result = aggregator
            .fetch_open_invoices(TenantId::new(), date(2026, 4, 30))
            .await;

        assert!(matches!(result, Err(AggregationError::DataSource(_))));
    }

    #[test]
    fn test_settings_from_config() {
        let config = ReportingConfig {
            recognition: RecognitionPolicy::InvoiceDate,
            fuel_accounting: FuelAccounting::FuelLog,
            trend_months: 6,
        };
        let settings = AggregationSettings::from(&config);
        assert_eq!(settings.recognition, RecognitionPolicy::InvoiceDate);
        assert_eq!(settings.fuel_accounting, FuelAccounting::FuelLog);
    }
}
