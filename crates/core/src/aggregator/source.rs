//! Data source port.

use chrono::NaiveDate;
use freightbook_shared::types::{RecognitionPolicy, TenantId};

use super::error::AggregationError;
use crate::period::ReportPeriod;
use crate::pnl::{BusinessExpenseRow, FuelEntryRow, OrderRow, TripExpenseRow};
use crate::receivables::InvoiceRow;

/// Read-only access to a tenant's operational rows.
///
/// Implementations scope every query to the tenant and the window; rows come
/// back as stored, malformed values included.
#[async_trait::async_trait]
pub trait PeriodDataSource: Send + Sync {
    /// Orders whose date under `recognition` falls inside `period`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store fails or the tenant is unknown.
    async fn fetch_orders(
        &self,
        tenant_id: TenantId,
        period: ReportPeriod,
        recognition: RecognitionPolicy,
    ) -> Result<Vec<OrderRow>, AggregationError>;

    /// Trip expenses dated inside `period`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store fails or the tenant is unknown.
    async fn fetch_trip_expenses(
        &self,
        tenant_id: TenantId,
        period: ReportPeriod,
    ) -> Result<Vec<TripExpenseRow>, AggregationError>;

    /// Business expenses whose effective range overlaps `period`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store fails or the tenant is unknown.
    async fn fetch_business_expenses(
        &self,
        tenant_id: TenantId,
        period: ReportPeriod,
    ) -> Result<Vec<BusinessExpenseRow>, AggregationError>;

    /// Fuel log entries dated inside `period`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store fails or the tenant is unknown.
    async fn fetch_fuel_entries(
        &self,
        tenant_id: TenantId,
        period: ReportPeriod,
    ) -> Result<Vec<FuelEntryRow>, AggregationError>;

    /// Invoices issued on or before `as_of` that may still carry a balance.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store fails or the tenant is unknown.
    async fn fetch_open_invoices(
        &self,
        tenant_id: TenantId,
        as_of: NaiveDate,
    ) -> Result<Vec<InvoiceRow>, AggregationError>;
}
