//! Factoring fee routes.

use axum::{Json, Router, extract::State, routing::post};
use freightbook_core::factoring::{FactoringBatch, FactoringTerms, calculate_batch};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::AppState;
use crate::error::ApiResult;

/// Creates the factoring routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/factoring/fees", post(fees))
}

/// Request body for a fee quote.
#[derive(Debug, Deserialize)]
pub struct FeesRequest {
    /// Invoice face values.
    pub amounts: Vec<Decimal>,
    /// Terms; the configured defaults apply when absent.
    #[serde(default)]
    pub terms: Option<FactoringTerms>,
}

/// POST /factoring/fees
async fn fees(
    State(state): State<AppState>,
    Json(request): Json<FeesRequest>,
) -> ApiResult<Json<FactoringBatch>> {
    let terms = request.terms.unwrap_or(state.factoring);
    Ok(Json(calculate_batch(&request.amounts, &terms)?))
}
