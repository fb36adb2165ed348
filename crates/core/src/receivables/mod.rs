//! Receivables aging.

pub mod aging;
pub mod types;

pub use aging::calculate_aging;
pub use types::{AgingBucket, AgingBucketKind, AgingReport, InvoiceRow, InvoiceStatus};
