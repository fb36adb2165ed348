//! Factoring error types.

use freightbook_shared::AppError;
use rust_decimal::Decimal;
use thiserror::Error;

/// Factoring-related errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FactoringError {
    /// Fee percentage outside 0-100.
    #[error("Fee percentage must be between 0 and 100, got {0}")]
    InvalidFeePct(Decimal),

    /// Reserve percentage outside 0-100.
    #[error("Reserve percentage must be between 0 and 100, got {0}")]
    InvalidReservePct(Decimal),

    /// Flat fee below zero.
    #[error("Flat fee cannot be negative, got {0}")]
    NegativeFlatFee(Decimal),

    /// Invoice amount below zero.
    #[error("Invoice amount cannot be negative, got {0}")]
    NegativeAmount(Decimal),
}

impl From<FactoringError> for AppError {
    fn from(err: FactoringError) -> Self {
        Self::Validation(err.to_string())
    }
}
