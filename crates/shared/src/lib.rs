//! Shared types, errors, and configuration for Freightbook.
//!
//! This crate provides common types used across all other crates:
//! - Cent-level and percentage rounding helpers
//! - Typed IDs for type-safe entity references
//! - Reporting policies (revenue recognition, fuel accounting)
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::AppError;
