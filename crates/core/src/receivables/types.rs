//! Receivables data types.

use chrono::NaiveDate;
use freightbook_shared::types::InvoiceId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::pnl::lenient;

/// Status of a customer invoice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    /// Not yet sent; not a receivable.
    Draft,
    /// Sent and awaiting payment.
    #[default]
    Sent,
    /// Partially paid.
    Partial,
    /// Fully paid.
    Paid,
    /// Voided.
    Void,
    /// Marked overdue.
    Overdue,
    /// Any status this version does not know about; treated as open.
    #[serde(other)]
    Unknown,
}

impl InvoiceStatus {
    /// Returns true if the invoice can carry an outstanding balance.
    #[must_use]
    pub const fn is_open(self) -> bool {
        !matches!(self, Self::Draft | Self::Paid | Self::Void)
    }
}

/// One customer invoice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvoiceRow {
    /// Invoice ID, if known.
    #[serde(default, deserialize_with = "lenient::id")]
    pub invoice_id: Option<InvoiceId>,
    /// Billed customer.
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub customer_name: Option<String>,
    /// Invoice date.
    #[serde(default, deserialize_with = "lenient::date")]
    pub invoice_date: Option<NaiveDate>,
    /// Payment due date.
    #[serde(default, deserialize_with = "lenient::date")]
    pub due_date: Option<NaiveDate>,
    /// Invoice total.
    #[serde(default, deserialize_with = "lenient::amount")]
    pub amount: Option<Decimal>,
    /// Amount received so far.
    #[serde(default, deserialize_with = "lenient::amount")]
    pub amount_paid: Option<Decimal>,
    /// Invoice status.
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub status: InvoiceStatus,
}

/// Aging bucket by days past due.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AgingBucketKind {
    /// Not yet due.
    #[serde(rename = "current")]
    Current,
    /// 1-30 days past due.
    #[serde(rename = "1_30")]
    Days1To30,
    /// 31-60 days past due.
    #[serde(rename = "31_60")]
    Days31To60,
    /// 61-90 days past due.
    #[serde(rename = "61_90")]
    Days61To90,
    /// More than 90 days past due.
    #[serde(rename = "90_plus")]
    Over90,
}

impl AgingBucketKind {
    /// All buckets, youngest first.
    pub const ALL: [Self; 5] = [
        Self::Current,
        Self::Days1To30,
        Self::Days31To60,
        Self::Days61To90,
        Self::Over90,
    ];

    /// Bucket for a number of days past due.
    #[must_use]
    pub const fn for_days(days_past_due: i64) -> Self {
        match days_past_due {
            i64::MIN..=0 => Self::Current,
            1..=30 => Self::Days1To30,
            31..=60 => Self::Days31To60,
            61..=90 => Self::Days61To90,
            _ => Self::Over90,
        }
    }
}

/// Totals for one aging bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgingBucket {
    /// Bucket.
    pub bucket: AgingBucketKind,
    /// Outstanding amount in the bucket.
    pub amount: Decimal,
    /// Number of invoices in the bucket.
    pub count: u64,
    /// Share of total outstanding (one decimal place).
    pub percent: Decimal,
}

/// Receivables aging report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgingReport {
    /// Aging reference date.
    pub as_of: NaiveDate,
    /// Buckets, youngest first.
    pub buckets: Vec<AgingBucket>,
    /// Total outstanding across all buckets.
    pub total_outstanding: Decimal,
    /// Number of open invoices with a balance.
    pub invoice_count: u64,
    /// Outstanding-weighted average days past due (one decimal place).
    pub weighted_average_days_past_due: Decimal,
}

impl AgingReport {
    /// Bucket totals for `kind`.
    #[must_use]
    pub fn bucket(&self, kind: AgingBucketKind) -> Option<&AgingBucket> {
        self.buckets.iter().find(|b| b.bucket == kind)
    }
}
