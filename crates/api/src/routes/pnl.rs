//! Profit-and-loss routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};
use chrono::{NaiveDate, Utc};
use freightbook_core::cache::PnLReport;
use freightbook_core::period::ReportPeriod;
use freightbook_core::pnl::{
    DataQualityReport, PnLInput, PnLOutput, UnitMetrics, calculate_pnl, calculate_unit_metrics,
};
use freightbook_core::trend::{TrendReport, monthly_trend};
use freightbook_shared::AppError;
use freightbook_shared::types::TenantId;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::AppState;
use crate::error::ApiResult;

/// Creates the P&L routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/pnl/calculate", post(calculate))
        .route("/tenants/{tenant_id}/pnl", get(period_report))
        .route("/tenants/{tenant_id}/pnl/trend", get(trend))
        .route("/tenants/{tenant_id}/pnl/invalidate", post(invalidate))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Inclusive reporting window in the query string.
#[derive(Debug, Deserialize)]
pub struct PeriodQuery {
    /// First day.
    pub from: NaiveDate,
    /// Last day.
    pub to: NaiveDate,
}

impl PeriodQuery {
    /// The window as a period.
    #[must_use]
    pub const fn period(&self) -> ReportPeriod {
        ReportPeriod::new(self.from, self.to)
    }
}

/// Trend query parameters.
#[derive(Debug, Deserialize)]
pub struct TrendQuery {
    /// Number of months; defaults to the configured length.
    pub months: Option<u32>,
    /// Any day in the last month of the series; defaults to today.
    pub anchor: Option<NaiveDate>,
}

/// Change notification from the operational side.
///
/// With no dates every cached report of the tenant is dropped.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ChangeNotification {
    /// First affected day.
    pub from: Option<NaiveDate>,
    /// Last affected day; absent means open-ended.
    pub to: Option<NaiveDate>,
}

/// Stateless calculation result.
#[derive(Debug, Serialize)]
pub struct CalculateResponse {
    /// P&L statement.
    pub pnl: PnLOutput,
    /// Unit economics.
    pub metrics: UnitMetrics,
    /// Malformed row counts.
    pub data_quality: DataQualityReport,
}

/// Acknowledgement of a change notification.
#[derive(Debug, Serialize)]
pub struct InvalidateResponse {
    /// Always `accepted`.
    pub status: &'static str,
    /// `range` or `tenant`.
    pub scope: &'static str,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST /pnl/calculate
async fn calculate(Json(input): Json<PnLInput>) -> Json<CalculateResponse> {
    let pnl = calculate_pnl(&input);
    let metrics = calculate_unit_metrics(&input, &pnl);
    Json(CalculateResponse {
        pnl,
        metrics,
        data_quality: DataQualityReport::assess(&input),
    })
}

/// GET /tenants/{tenant_id}/pnl?from&to
async fn period_report(
    State(state): State<AppState>,
    Path(tenant_id): Path<TenantId>,
    Query(query): Query<PeriodQuery>,
) -> ApiResult<Json<PnLReport>> {
    let report = state
        .cache
        .get_or_fetch(&state.aggregator, tenant_id, query.period())
        .await?;
    Ok(Json(report))
}

/// GET /tenants/{tenant_id}/pnl/trend?months&anchor
async fn trend(
    State(state): State<AppState>,
    Path(tenant_id): Path<TenantId>,
    Query(query): Query<TrendQuery>,
) -> ApiResult<Json<TrendReport>> {
    let months = query.months.unwrap_or(state.trend_months);
    let anchor = query.anchor.unwrap_or_else(|| Utc::now().date_naive());
    let report = monthly_trend(&state.aggregator, tenant_id, anchor, months).await?;
    Ok(Json(report))
}

/// POST /tenants/{tenant_id}/pnl/invalidate
async fn invalidate(
    State(state): State<AppState>,
    Path(tenant_id): Path<TenantId>,
    Json(notification): Json<ChangeNotification>,
) -> ApiResult<(StatusCode, Json<InvalidateResponse>)> {
    let scope = match (notification.from, notification.to) {
        (Some(from), to) => {
            if to.is_some_and(|to| to < from) {
                return Err(AppError::Validation(format!(
                    "Change range end {} is before start {from}",
                    to.unwrap_or(from)
                ))
                .into());
            }
            state.cache.invalidate_range(tenant_id, from, to);
            "range"
        }
        (None, _) => {
            state.cache.invalidate_tenant(tenant_id);
            "tenant"
        }
    };

    info!(tenant_id = %tenant_id, scope, "P&L cache invalidated");

    Ok((
        StatusCode::ACCEPTED,
        Json(InvalidateResponse {
            status: "accepted",
            scope,
        }),
    ))
}
