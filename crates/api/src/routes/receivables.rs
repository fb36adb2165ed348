//! Receivables routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use chrono::{NaiveDate, Utc};
use freightbook_core::receivables::{AgingReport, calculate_aging};
use freightbook_shared::types::TenantId;
use serde::Deserialize;

use crate::AppState;
use crate::error::ApiResult;

/// Creates the receivables routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/tenants/{tenant_id}/receivables/aging", get(aging))
}

/// Aging query parameters.
#[derive(Debug, Deserialize)]
pub struct AgingQuery {
    /// Reference date; defaults to today.
    pub as_of: Option<NaiveDate>,
}

/// GET /tenants/{tenant_id}/receivables/aging?as_of
async fn aging(
    State(state): State<AppState>,
    Path(tenant_id): Path<TenantId>,
    Query(query): Query<AgingQuery>,
) -> ApiResult<Json<AgingReport>> {
    let as_of = query.as_of.unwrap_or_else(|| Utc::now().date_naive());
    let invoices = state.aggregator.fetch_open_invoices(tenant_id, as_of).await?;
    Ok(Json(calculate_aging(&invoices, as_of)))
}
