//! Invoice factoring fees.
//!
//! A factoring company buys an invoice at a discount: it keeps a percentage
//! fee plus an optional flat fee, holds back a reserve until the debtor pays,
//! and advances the rest.

pub mod error;
pub mod service;
pub mod types;

pub use error::FactoringError;
pub use service::{calculate_batch, calculate_fee};
pub use types::{FactoringBatch, FactoringFee, FactoringTerms};
