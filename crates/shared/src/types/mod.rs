//! Common types used across the application.

pub mod id;
pub mod money;
pub mod policy;

pub use id::*;
pub use policy::{FuelAccounting, RecognitionPolicy};
