//! In-memory data source backed by a tenant snapshot.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use freightbook_shared::types::{RecognitionPolicy, TenantId};
use serde::{Deserialize, Serialize};

use super::error::AggregationError;
use super::source::PeriodDataSource;
use crate::period::ReportPeriod;
use crate::pnl::{BusinessExpenseRow, FuelEntryRow, OrderRow, TripExpenseRow};
use crate::receivables::InvoiceRow;

/// All rows stored for one tenant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TenantSnapshot {
    /// Transport orders.
    #[serde(default)]
    pub orders: Vec<OrderRow>,
    /// Trip expenses.
    #[serde(default)]
    pub trip_expenses: Vec<TripExpenseRow>,
    /// Business expenses.
    #[serde(default)]
    pub business_expenses: Vec<BusinessExpenseRow>,
    /// Fuel log.
    #[serde(default)]
    pub fuel_entries: Vec<FuelEntryRow>,
    /// Customer invoices.
    #[serde(default)]
    pub invoices: Vec<InvoiceRow>,
}

#[derive(Deserialize)]
struct SnapshotFile {
    #[serde(default)]
    tenants: HashMap<TenantId, TenantSnapshot>,
}

/// A [`PeriodDataSource`] serving rows from memory.
///
/// Filters by tenant and window the way a database query would.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDataSource {
    tenants: HashMap<TenantId, Arc<TenantSnapshot>>,
}

impl InMemoryDataSource {
    /// Creates an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a snapshot of the form `{ "tenants": { "<uuid>": { ... } } }`.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not valid JSON of that shape.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let file: SnapshotFile = serde_json::from_str(json)?;
        Ok(Self {
            tenants: file
                .tenants
                .into_iter()
                .map(|(id, snapshot)| (id, Arc::new(snapshot)))
                .collect(),
        })
    }

    /// Registers (or replaces) a tenant's rows.
    #[must_use]
    pub fn with_tenant(mut self, tenant_id: TenantId, snapshot: TenantSnapshot) -> Self {
        self.tenants.insert(tenant_id, Arc::new(snapshot));
        self
    }

    /// Number of tenants held.
    #[must_use]
    pub fn tenant_count(&self) -> usize {
        self.tenants.len()
    }

    fn tenant(&self, tenant_id: TenantId) -> Result<&TenantSnapshot, AggregationError> {
        self.tenants
            .get(&tenant_id)
            .map(Arc::as_ref)
            .ok_or(AggregationError::TenantNotFound(tenant_id))
    }
}

fn within(date: Option<NaiveDate>, period: ReportPeriod) -> bool {
    date.is_some_and(|d| period.contains(d))
}

#[async_trait::async_trait]
impl PeriodDataSource for InMemoryDataSource {
    async fn fetch_orders(
        &self,
        tenant_id: TenantId,
        period: ReportPeriod,
        recognition: RecognitionPolicy,
    ) -> Result<Vec<OrderRow>, AggregationError> {
        Ok(self
            .tenant(tenant_id)?
            .orders
            .iter()
            .filter(|order| !order.is_cancelled())
            .filter(|order| within(order.recognition_date(recognition), period))
            .cloned()
            .collect())
    }

    async fn fetch_trip_expenses(
        &self,
        tenant_id: TenantId,
        period: ReportPeriod,
    ) -> Result<Vec<TripExpenseRow>, AggregationError> {
        Ok(self
            .tenant(tenant_id)?
            .trip_expenses
            .iter()
            .filter(|expense| within(expense.expense_date, period))
            .cloned()
            .collect())
    }

    async fn fetch_business_expenses(
        &self,
        tenant_id: TenantId,
        period: ReportPeriod,
    ) -> Result<Vec<BusinessExpenseRow>, AggregationError> {
        // Rows without a start date are passed through so they show up in the
        // data-quality counts; proration ignores them.
        Ok(self
            .tenant(tenant_id)?
            .business_expenses
            .iter()
            .filter(|expense| {
                expense
                    .effective_from
                    .is_none_or(|from| period.overlap(from, expense.effective_to).is_some())
            })
            .cloned()
            .collect())
    }

    async fn fetch_fuel_entries(
        &self,
        tenant_id: TenantId,
        period: ReportPeriod,
    ) -> Result<Vec<FuelEntryRow>, AggregationError> {
        Ok(self
            .tenant(tenant_id)?
            .fuel_entries
            .iter()
            .filter(|entry| within(entry.entry_date, period))
            .cloned()
            .collect())
    }

    async fn fetch_open_invoices(
        &self,
        tenant_id: TenantId,
        as_of: NaiveDate,
    ) -> Result<Vec<InvoiceRow>, AggregationError> {
        Ok(self
            .tenant(tenant_id)?
            .invoices
            .iter()
            .filter(|invoice| invoice.status.is_open())
            .filter(|invoice| invoice.invoice_date.is_none_or(|date| date <= as_of))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pnl::{OrderStatus, Recurrence, TripExpenseCategory};
    use crate::receivables::InvoiceStatus;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn april() -> ReportPeriod {
        ReportPeriod::new(date(2026, 4, 1), date(2026, 4, 30))
    }

    #[tokio::test]
    async fn test_unknown_tenant() {
        let source = InMemoryDataSource::new();
        let result = source.fetch_trip_expenses(TenantId::new(), april()).await;
        assert!(matches!(result, Err(AggregationError::TenantNotFound(_))));
    }

    #[tokio::test]
    async fn test_orders_filtered_by_recognition_date_and_status() {
        let tenant = TenantId::new();
        let source = InMemoryDataSource::new().with_tenant(
            tenant,
            TenantSnapshot {
                orders: vec![
                    OrderRow {
                        created_at: Some(date(2026, 3, 28)),
                        delivered_at: Some(date(2026, 4, 2)),
                        ..OrderRow::default()
                    },
                    OrderRow {
                        delivered_at: None,
                        ..OrderRow::default()
                    },
                    OrderRow {
                        status: OrderStatus::Cancelled,
                        created_at: Some(date(2026, 4, 5)),
                        delivered_at: Some(date(2026, 4, 9)),
                        ..OrderRow::default()
                    },
                ],
                ..TenantSnapshot::default()
            },
        );

        let delivered = source
            .fetch_orders(tenant, april(), RecognitionPolicy::DeliveryDate)
            .await
            .unwrap();
        let created = source
            .fetch_orders(tenant, april(), RecognitionPolicy::CreatedDate)
            .await
            .unwrap();

        assert_eq!(delivered.len(), 1);
        assert!(created.is_empty());
    }

    #[tokio::test]
    async fn test_business_expenses_by_overlap() {
        let tenant = TenantId::new();
        let expense = |from: Option<NaiveDate>, to: Option<NaiveDate>| BusinessExpenseRow {
            category: "insurance".to_string(),
            recurrence: Recurrence::Monthly,
            amount: Some(dec!(100)),
            effective_from: from,
            effective_to: to,
        };
        let source = InMemoryDataSource::new().with_tenant(
            tenant,
            TenantSnapshot {
                business_expenses: vec![
                    expense(Some(date(2025, 1, 1)), None),
                    expense(Some(date(2025, 1, 1)), Some(date(2026, 3, 31))),
                    expense(Some(date(2026, 4, 30)), None),
                    expense(Some(date(2026, 5, 1)), None),
                    expense(None, None),
                ],
                ..TenantSnapshot::default()
            },
        );

        let rows = source
            .fetch_business_expenses(tenant, april())
            .await
            .unwrap();

        assert_eq!(rows.len(), 3);
    }

    #[tokio::test]
    async fn test_open_invoices() {
        let tenant = TenantId::new();
        let invoice = |status: InvoiceStatus, issued: NaiveDate| InvoiceRow {
            amount: Some(dec!(100)),
            invoice_date: Some(issued),
            status,
            ..InvoiceRow::default()
        };
        let source = InMemoryDataSource::new().with_tenant(
            tenant,
            TenantSnapshot {
                invoices: vec![
                    invoice(InvoiceStatus::Sent, date(2026, 4, 1)),
                    invoice(InvoiceStatus::Paid, date(2026, 4, 1)),
                    invoice(InvoiceStatus::Sent, date(2026, 5, 1)),
                ],
                ..TenantSnapshot::default()
            },
        );

        let rows = source
            .fetch_open_invoices(tenant, date(2026, 4, 30))
            .await
            .unwrap();

        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "tenants": {
                "0190f1a4-0000-7000-8000-000000000001": {
                    "orders": [
                        { "revenue": "$1,200.50", "carrier_pay": 900, "delivered_at": "2026-04-03" }
                    ],
                    "business_expenses": [
                        { "category": "rent", "recurrence": "monthly", "amount": "2000", "effective_from": "2026-01-01" }
                    ]
                }
            }
        }"#;

        let source = InMemoryDataSource::from_json(json).unwrap();
        assert_eq!(source.tenant_count(), 1);

        let tenant: TenantId = "0190f1a4-0000-7000-8000-000000000001".parse().unwrap();
        let snapshot = source.tenant(tenant).unwrap();
        assert_eq!(snapshot.orders[0].revenue, Some(dec!(1200.50)));
        assert_eq!(snapshot.business_expenses[0].recurrence, Recurrence::Monthly);
    }

    #[test]
    fn test_from_json_survives_null_labels_and_bad_ids() {
        let json = r#"{
            "tenants": {
                "0190f1a4-0000-7000-8000-000000000001": {
                    "orders": [
                        { "revenue": 900, "status": null, "dispatcher_id": "d-17", "delivered_at": "2026-04-03" }
                    ],
                    "trip_expenses": [ { "category": null, "amount": 40, "expense_date": "2026-04-03" } ],
                    "invoices": [ { "invoice_id": "INV-1", "customer_name": null, "amount": 500, "status": null } ]
                }
            }
        }"#;

        let source = InMemoryDataSource::from_json(json).unwrap();

        let tenant: TenantId = "0190f1a4-0000-7000-8000-000000000001".parse().unwrap();
        let snapshot = source.tenant(tenant).unwrap();
        assert_eq!(snapshot.orders[0].dispatcher_id, None);
        assert_eq!(snapshot.orders[0].status, OrderStatus::default());
        assert_eq!(snapshot.trip_expenses[0].category, TripExpenseCategory::Misc);
        assert_eq!(snapshot.invoices[0].invoice_id, None);
        assert_eq!(snapshot.invoices[0].status, InvoiceStatus::Sent);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(InMemoryDataSource::from_json("not json").is_err());
    }
}
