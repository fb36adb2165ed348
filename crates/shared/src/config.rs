//! Application configuration management.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::types::{FuelAccounting, RecognitionPolicy};

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Reporting policies.
    #[serde(default)]
    pub reporting: ReportingConfig,
    /// P&L result cache settings.
    #[serde(default)]
    pub cache: CacheConfig,
    /// Data source settings.
    #[serde(default)]
    pub data: DataConfig,
    /// Default factoring terms.
    #[serde(default)]
    pub factoring: FactoringConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Reporting configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportingConfig {
    /// Order date that governs period inclusion.
    #[serde(default)]
    pub recognition: RecognitionPolicy,
    /// Source of fuel cost.
    #[serde(default)]
    pub fuel_accounting: FuelAccounting,
    /// Default number of months in a trend series.
    #[serde(default = "default_trend_months")]
    pub trend_months: u32,
}

impl Default for ReportingConfig {
    fn default() -> Self {
        Self {
            recognition: RecognitionPolicy::default(),
            fuel_accounting: FuelAccounting::default(),
            trend_months: default_trend_months(),
        }
    }
}

fn default_trend_months() -> u32 {
    6
}

/// Cache configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of cached period reports.
    #[serde(default = "default_cache_capacity")]
    pub max_capacity: u64,
    /// Time-to-live of a cached report in seconds.
    #[serde(default = "default_cache_ttl")]
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: default_cache_capacity(),
            ttl_secs: default_cache_ttl(),
        }
    }
}

fn default_cache_capacity() -> u64 {
    1_000
}

fn default_cache_ttl() -> u64 {
    300 // 5 minutes
}

/// Data source configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// Path to the JSON tenant snapshot served by the in-memory data source.
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            snapshot_path: default_snapshot_path(),
        }
    }
}

fn default_snapshot_path() -> String {
    "data/snapshot.json".to_string()
}

/// Default factoring terms applied when a request does not carry its own.
#[derive(Debug, Clone, Deserialize)]
pub struct FactoringConfig {
    /// Percentage fee on the invoice face value.
    #[serde(default = "default_fee_pct")]
    pub fee_pct: Decimal,
    /// Flat fee per invoice.
    #[serde(default)]
    pub flat_fee: Decimal,
    /// Percentage held back in reserve until the debtor pays.
    #[serde(default)]
    pub reserve_pct: Decimal,
}

impl Default for FactoringConfig {
    fn default() -> Self {
        Self {
            fee_pct: default_fee_pct(),
            flat_fee: Decimal::ZERO,
            reserve_pct: Decimal::ZERO,
        }
    }
}

fn default_fee_pct() -> Decimal {
    Decimal::new(3, 0)
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("FREIGHTBOOK").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_defaults_without_sources() {
        temp_env::with_vars_unset(["FREIGHTBOOK__SERVER__PORT", "RUN_MODE"], || {
            let config = AppConfig::load().unwrap();
            assert_eq!(config.server.port, 8080);
            assert_eq!(config.reporting.recognition, RecognitionPolicy::DeliveryDate);
            assert_eq!(config.reporting.trend_months, 6);
            assert_eq!(config.cache.ttl_secs, 300);
            assert_eq!(config.factoring.fee_pct, dec!(3));
        });
    }

    #[test]
    fn test_environment_overrides() {
        temp_env::with_vars(
            [
                ("FREIGHTBOOK__SERVER__PORT", Some("9090")),
                ("FREIGHTBOOK__REPORTING__RECOGNITION", Some("invoice_date")),
                ("FREIGHTBOOK__REPORTING__FUEL_ACCOUNTING", Some("fuel_log")),
                ("FREIGHTBOOK__FACTORING__FEE_PCT", Some("2.5")),
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.server.port, 9090);
                assert_eq!(config.reporting.recognition, RecognitionPolicy::InvoiceDate);
                assert_eq!(config.reporting.fuel_accounting, FuelAccounting::FuelLog);
                assert_eq!(config.factoring.fee_pct, dec!(2.5));
            },
        );
    }
}
