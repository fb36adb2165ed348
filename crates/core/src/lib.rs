//! Core profitability logic for Freightbook.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Data enters through the `aggregator` port as plain rows; everything else is
//! deterministic arithmetic over `rust_decimal::Decimal`.
//!
//! # Modules
//!
//! - `period` - Reporting windows, overlaps, and calendar months
//! - `pnl` - Proration, P&L statement, and unit economics
//! - `trend` - Trailing monthly P&L series
//! - `receivables` - Receivables aging
//! - `dispatch` - Dispatcher performance roll-ups
//! - `factoring` - Invoice factoring fees
//! - `aggregator` - Period data gathering behind a data source port
//! - `cache` - Memoized period reports per tenant

pub mod aggregator;
pub mod cache;
pub mod dispatch;
pub mod factoring;
pub mod period;
pub mod pnl;
pub mod receivables;
pub mod trend;
