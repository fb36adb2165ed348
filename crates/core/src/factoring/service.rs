//! Factoring fee calculation.

use freightbook_shared::types::money::round_money;
use rust_decimal::Decimal;

use super::error::FactoringError;
use super::types::{FactoringBatch, FactoringFee, FactoringTerms};

fn share(amount: Decimal, pct: Decimal) -> Decimal {
    amount
        .checked_mul(pct)
        .and_then(|v| v.checked_div(Decimal::ONE_HUNDRED))
        .map_or(Decimal::ZERO, round_money)
}

/// Computes fee, reserve, and advance for one invoice.
///
/// # Errors
///
/// Returns an error if the terms are out of range or the amount is negative.
pub fn calculate_fee(
    amount: Decimal,
    terms: &FactoringTerms,
) -> Result<FactoringFee, FactoringError> {
    terms.validate()?;
    if amount < Decimal::ZERO {
        return Err(FactoringError::NegativeAmount(amount));
    }

    let amount = round_money(amount);
    let fee = round_money(share(amount, terms.fee_pct).saturating_add(terms.flat_fee));
    let reserve = share(amount, terms.reserve_pct);
    let advance = round_money(
        amount
            .saturating_sub(fee)
            .saturating_sub(reserve)
            .max(Decimal::ZERO),
    );

    Ok(FactoringFee {
        invoice_amount: amount,
        fee,
        reserve,
        advance,
    })
}

/// Computes fees for a batch of invoices and sums them.
///
/// # Errors
///
/// Fails on the first invalid amount; nothing is returned for the batch.
pub fn calculate_batch(
    amounts: &[Decimal],
    terms: &FactoringTerms,
) -> Result<FactoringBatch, FactoringError> {
    let invoices = amounts
        .iter()
        .map(|amount| calculate_fee(*amount, terms))
        .collect::<Result<Vec<_>, _>>()?;

    let sum = |field: fn(&FactoringFee) -> Decimal| {
        invoices
            .iter()
            .map(field)
            .fold(Decimal::ZERO, Decimal::saturating_add)
    };

    Ok(FactoringBatch {
        terms: *terms,
        total_amount: sum(|f| f.invoice_amount),
        total_fee: sum(|f| f.fee),
        total_reserve: sum(|f| f.reserve),
        total_advance: sum(|f| f.advance),
        invoices,
    })
}
