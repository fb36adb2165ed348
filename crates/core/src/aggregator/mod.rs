//! Period data gathering.
//!
//! The aggregator collects the rows a period needs from a [`PeriodDataSource`]
//! and hands the engine a ready [`crate::pnl::PnLInput`]. The engine never
//! talks to storage directly.

pub mod error;
pub mod memory;
pub mod service;
pub mod source;

pub use error::AggregationError;
pub use memory::{InMemoryDataSource, TenantSnapshot};
pub use service::{AggregationSettings, PeriodAggregator};
pub use source::PeriodDataSource;
