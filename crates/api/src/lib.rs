//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes for P&L, trends, receivables, dispatchers, and factoring
//! - Shared application state
//! - JSON error responses

pub mod error;
pub mod routes;

#[cfg(test)]
mod test_support;

use std::sync::Arc;

use axum::Router;
use freightbook_core::aggregator::{AggregationSettings, PeriodAggregator, PeriodDataSource};
use freightbook_core::cache::PnLCache;
use freightbook_core::factoring::FactoringTerms;
use freightbook_shared::AppConfig;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Period data gathering.
    pub aggregator: Arc<PeriodAggregator>,
    /// Memoized period reports.
    pub cache: PnLCache,
    /// Default number of months in a trend.
    pub trend_months: u32,
    /// Factoring terms used when a request carries none.
    pub factoring: FactoringTerms,
}

impl AppState {
    /// Wires the state from configuration over the given data source.
    #[must_use]
    pub fn new(source: Arc<dyn PeriodDataSource>, config: &AppConfig) -> Self {
        let settings = AggregationSettings::from(&config.reporting);
        Self {
            aggregator: Arc::new(PeriodAggregator::new(source, settings)),
            cache: PnLCache::from(&config.cache),
            trend_months: config.reporting.trend_months,
            factoring: FactoringTerms::from(&config.factoring),
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
