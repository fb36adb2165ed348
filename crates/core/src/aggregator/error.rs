//! Aggregation error types.

use chrono::NaiveDate;
use freightbook_shared::AppError;
use freightbook_shared::types::TenantId;
use thiserror::Error;

/// Errors raised while gathering period data.
#[derive(Debug, Error)]
pub enum AggregationError {
    /// Period start after end.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// Start date.
        start: NaiveDate,
        /// End date.
        end: NaiveDate,
    },

    /// A fetch from the data source failed.
    #[error("Data source error: {0}")]
    DataSource(String),

    /// No data is registered for the tenant.
    #[error("Tenant not found: {0}")]
    TenantNotFound(TenantId),
}

impl From<AggregationError> for AppError {
    fn from(err: AggregationError) -> Self {
        match err {
            AggregationError::InvalidDateRange { .. } => Self::Validation(err.to_string()),
            AggregationError::TenantNotFound(_) => Self::NotFound(err.to_string()),
            AggregationError::DataSource(msg) => Self::DataSource(msg),
        }
    }
}
