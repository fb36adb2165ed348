//! Trend error types.

use freightbook_shared::AppError;
use thiserror::Error;

use crate::aggregator::AggregationError;

/// Trend-related errors.
#[derive(Debug, Error)]
pub enum TrendError {
    /// Month count outside the supported range.
    #[error("Trend months must be between 1 and {max}, got {months}")]
    InvalidMonths {
        /// Requested months.
        months: u32,
        /// Upper bound.
        max: u32,
    },

    /// Gathering a month's data failed.
    #[error(transparent)]
    Aggregation(#[from] AggregationError),
}

impl From<TrendError> for AppError {
    fn from(err: TrendError) -> Self {
        match err {
            TrendError::InvalidMonths { .. } => Self::Validation(err.to_string()),
            TrendError::Aggregation(inner) => inner.into(),
        }
    }
}
