//! Dispatcher performance routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use freightbook_core::dispatch::{DispatcherPerformance, calculate_dispatcher_performance};
use freightbook_core::period::ReportPeriod;
use freightbook_shared::types::TenantId;
use serde::Serialize;

use super::pnl::PeriodQuery;
use crate::AppState;
use crate::error::ApiResult;

/// Creates the dispatcher routes.
pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/tenants/{tenant_id}/dispatchers/performance",
        get(performance),
    )
}

/// Dispatcher leaderboard for a period.
#[derive(Debug, Serialize)]
pub struct PerformanceResponse {
    /// Reporting window.
    pub period: ReportPeriod,
    /// One row per dispatcher, highest revenue first.
    pub dispatchers: Vec<DispatcherPerformance>,
}

/// GET /tenants/{tenant_id}/dispatchers/performance?from&to
async fn performance(
    State(state): State<AppState>,
    Path(tenant_id): Path<TenantId>,
    Query(query): Query<PeriodQuery>,
) -> ApiResult<Json<PerformanceResponse>> {
    let period = query.period();
    let input = state
        .aggregator
        .fetch_period_data(tenant_id, period)
        .await?;

    Ok(Json(PerformanceResponse {
        period,
        dispatchers: calculate_dispatcher_performance(&input),
    }))
}
