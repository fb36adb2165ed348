//! Receivables aging calculation.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use freightbook_shared::types::money::{PERCENT_DP, percent_of, ratio, round_money};
use rust_decimal::Decimal;

use super::types::{AgingBucket, AgingBucketKind, AgingReport, InvoiceRow};

/// Outstanding balance of an invoice, floored at zero.
fn outstanding(invoice: &InvoiceRow) -> Decimal {
    let amount = invoice.amount.unwrap_or_default();
    let paid = invoice.amount_paid.unwrap_or_default();
    round_money(amount.saturating_sub(paid).max(Decimal::ZERO))
}

/// Ages open invoices as of `as_of`.
///
/// Days past due are measured from the due date, falling back to the invoice
/// date; an invoice with neither is treated as current. Draft, paid, and void
/// invoices and invoices with nothing outstanding are skipped.
#[must_use]
pub fn calculate_aging(invoices: &[InvoiceRow], as_of: NaiveDate) -> AgingReport {
    let mut totals: BTreeMap<AgingBucketKind, (Decimal, u64)> = BTreeMap::new();
    let mut total_outstanding = Decimal::ZERO;
    let mut weighted_days = Decimal::ZERO;
    let mut invoice_count = 0u64;

    for invoice in invoices.iter().filter(|i| i.status.is_open()) {
        let balance = outstanding(invoice);
        if balance.is_zero() {
            continue;
        }

        let days_past_due = invoice
            .due_date
            .or(invoice.invoice_date)
            .map_or(0, |due| (as_of - due).num_days());
        let bucket = AgingBucketKind::for_days(days_past_due);

        let entry = totals.entry(bucket).or_insert((Decimal::ZERO, 0));
        entry.0 = entry.0.saturating_add(balance);
        entry.1 += 1;

        total_outstanding = total_outstanding.saturating_add(balance);
        weighted_days = weighted_days
            .saturating_add(balance.saturating_mul(Decimal::from(days_past_due.max(0))));
        invoice_count += 1;
    }

    let buckets = AgingBucketKind::ALL
        .into_iter()
        .map(|kind| {
            let (amount, count) = totals.get(&kind).copied().unwrap_or((Decimal::ZERO, 0));
            AgingBucket {
                bucket: kind,
                amount,
                count,
                percent: percent_of(amount, total_outstanding),
            }
        })
        .collect();

    AgingReport {
        as_of,
        buckets,
        total_outstanding,
        invoice_count,
        weighted_average_days_past_due: ratio(weighted_days, total_outstanding, PERCENT_DP),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::receivables::types::InvoiceStatus;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn invoice(amount: Decimal, paid: Decimal, due: NaiveDate, status: InvoiceStatus) -> InvoiceRow {
        InvoiceRow {
            amount: Some(amount),
            amount_paid: Some(paid),
            due_date: Some(due),
            status,
            ..InvoiceRow::default()
        }
    }

    #[rstest]
    #[case(-5, AgingBucketKind::Current)]
    #[case(0, AgingBucketKind::Current)]
    #[case(1, AgingBucketKind::Days1To30)]
    #[case(30, AgingBucketKind::Days1To30)]
    #[case(31, AgingBucketKind::Days31To60)]
    #[case(60, AgingBucketKind::Days31To60)]
    #[case(61, AgingBucketKind::Days61To90)]
    #[case(90, AgingBucketKind::Days61To90)]
    #[case(91, AgingBucketKind::Over90)]
    fn test_bucket_boundaries(#[case] days: i64, #[case] expected: AgingBucketKind) {
        assert_eq!(AgingBucketKind::for_days(days), expected);
    }

    #[test]
    fn test_aging_report() {
        let as_of = date(2026, 4, 30);
        let invoices = vec![
            invoice(dec!(1000), dec!(0), date(2026, 5, 15), InvoiceStatus::Sent),
            invoice(dec!(2000), dec!(500), date(2026, 4, 10), InvoiceStatus::Partial),
            invoice(dec!(500), dec!(0), date(2026, 1, 1), InvoiceStatus::Overdue),
            invoice(dec!(900), dec!(900), date(2026, 1, 1), InvoiceStatus::Sent),
            invoice(dec!(700), dec!(0), date(2026, 1, 1), InvoiceStatus::Paid),
            invoice(dec!(300), dec!(0), date(2026, 1, 1), InvoiceStatus::Draft),
        ];

        let report = calculate_aging(&invoices, as_of);

        assert_eq!(report.invoice_count, 3);
        assert_eq!(report.total_outstanding, dec!(3000));
        assert_eq!(report.buckets.len(), 5);

        let current = report.bucket(AgingBucketKind::Current).unwrap();
        assert_eq!(current.amount, dec!(1000));
        assert_eq!(current.count, 1);
        assert_eq!(current.percent, dec!(33.3));

        let recent = report.bucket(AgingBucketKind::Days1To30).unwrap();
        assert_eq!(recent.amount, dec!(1500));
        assert_eq!(recent.percent, dec!(50.0));

        let old = report.bucket(AgingBucketKind::Over90).unwrap();
        assert_eq!(old.amount, dec!(500));
        assert_eq!(old.count, 1);

        // (1500 * 20 + 500 * 119) / 3000
        assert_eq!(report.weighted_average_days_past_due, dec!(29.8));
    }

    #[test]
    fn test_missing_due_date_falls_back_to_invoice_date() {
        let invoices = vec![InvoiceRow {
            amount: Some(dec!(250)),
            invoice_date: Some(date(2026, 3, 1)),
            ..InvoiceRow::default()
        }];
        let report = calculate_aging(&invoices, date(2026, 4, 15));
        assert_eq!(
            report.bucket(AgingBucketKind::Days31To60).unwrap().amount,
            dec!(250)
        );
    }

    #[test]
    fn test_no_open_invoices() {
        let report = calculate_aging(&[], date(2026, 4, 30));
        assert_eq!(report.total_outstanding, Decimal::ZERO);
        assert_eq!(report.weighted_average_days_past_due, Decimal::ZERO);
        assert!(report.buckets.iter().all(|b| b.percent.is_zero()));
    }

    #[test]
    fn test_overpaid_invoice_is_skipped() {
        let invoices = vec![invoice(
            dec!(100),
            dec!(150),
            date(2026, 1, 1),
            InvoiceStatus::Partial,
        )];
        assert_eq!(calculate_aging(&invoices, date(2026, 4, 30)).invoice_count, 0);
    }
}
