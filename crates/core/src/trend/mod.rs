//! Trailing monthly P&L series.

pub mod error;
pub mod service;
pub mod types;

pub use error::TrendError;
pub use service::{MAX_TREND_MONTHS, compose_trend, monthly_trend, trailing_windows};
pub use types::{MonthlyPnL, TrendReport, TrendSummary};
