//! Dispatcher performance.

pub mod performance;

pub use performance::{DispatcherPerformance, UNASSIGNED_DISPATCHER, calculate_dispatcher_performance};
