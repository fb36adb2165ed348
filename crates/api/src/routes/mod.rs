//! API route definitions.

use axum::Router;

use crate::AppState;

pub mod dispatchers;
pub mod factoring;
pub mod health;
pub mod pnl;
pub mod receivables;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(pnl::routes())
        .merge(dispatchers::routes())
        .merge(receivables::routes())
        .merge(factoring::routes())
}
