//! Factoring terms and results.

use freightbook_shared::config::FactoringConfig;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::FactoringError;

/// Terms agreed with the factoring company.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactoringTerms {
    /// Percentage fee on the invoice face value.
    pub fee_pct: Decimal,
    /// Flat fee per invoice.
    #[serde(default)]
    pub flat_fee: Decimal,
    /// Percentage held in reserve.
    #[serde(default)]
    pub reserve_pct: Decimal,
}

impl FactoringTerms {
    /// Checks the terms are within bounds.
    ///
    /// # Errors
    ///
    /// Returns the first out-of-range field.
    pub fn validate(&self) -> Result<(), FactoringError> {
        if self.fee_pct < Decimal::ZERO || self.fee_pct > Decimal::ONE_HUNDRED {
            return Err(FactoringError::InvalidFeePct(self.fee_pct));
        }
        if self.reserve_pct < Decimal::ZERO || self.reserve_pct > Decimal::ONE_HUNDRED {
            return Err(FactoringError::InvalidReservePct(self.reserve_pct));
        }
        if self.flat_fee < Decimal::ZERO {
            return Err(FactoringError::NegativeFlatFee(self.flat_fee));
        }
        Ok(())
    }
}

impl From<&FactoringConfig> for FactoringTerms {
    fn from(config: &FactoringConfig) -> Self {
        Self {
            fee_pct: config.fee_pct,
            flat_fee: config.flat_fee,
            reserve_pct: config.reserve_pct,
        }
    }
}

/// Fee breakdown for one invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactoringFee {
    /// Invoice face value.
    pub invoice_amount: Decimal,
    /// Percentage fee plus flat fee.
    pub fee: Decimal,
    /// Amount held in reserve.
    pub reserve: Decimal,
    /// Cash advanced now.
    pub advance: Decimal,
}

/// Totals for a batch of invoices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactoringBatch {
    /// Terms applied.
    pub terms: FactoringTerms,
    /// Per-invoice breakdowns, in input order.
    pub invoices: Vec<FactoringFee>,
    /// Sum of face values.
    pub total_amount: Decimal,
    /// Sum of fees.
    pub total_fee: Decimal,
    /// Sum of reserves.
    pub total_reserve: Decimal,
    /// Sum of advances.
    pub total_advance: Decimal,
}
