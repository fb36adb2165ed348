//! Reporting windows.

pub mod range;

pub use range::ReportPeriod;
