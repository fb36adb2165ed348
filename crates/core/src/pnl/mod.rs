//! Profit-and-loss calculation.
//!
//! This module provides pure business logic for period profitability:
//! - Proration of recurring business expenses
//! - P&L statement (revenue, carrier pay, trip and business expenses)
//! - Unit economics (per load, per mile)
//! - Data-quality counts for malformed rows

pub mod engine;
pub mod lenient;
pub mod proration;
pub mod quality;
pub mod types;


pub use engine::{calculate_pnl, calculate_unit_metrics};
pub use proration::prorate_expense;
pub use quality::DataQualityReport;
pub use types::*;
