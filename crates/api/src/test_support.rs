//! Router test helpers.

use std::str::FromStr;
use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use chrono::NaiveDate;
use freightbook_core::aggregator::{InMemoryDataSource, TenantSnapshot};
use freightbook_core::pnl::{
    BusinessExpenseRow, FuelEntryRow, OrderRow, Recurrence, TripExpenseCategory, TripExpenseRow,
};
use freightbook_core::receivables::{InvoiceRow, InvoiceStatus};
use freightbook_shared::AppConfig;
use freightbook_shared::types::{DispatcherId, TenantId};
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;
use tower::ServiceExt;

use crate::{AppState, create_router};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn decimal(value: &Value) -> Decimal {
    Decimal::from_str(value.as_str().expect("decimal serialized as string")).unwrap()
}

/// April 2026 for one carrier: two loads, tolls, fuel, insurance, and invoices.
pub fn snapshot(dispatcher: DispatcherId) -> TenantSnapshot {
    TenantSnapshot {
        orders: vec![
            OrderRow {
                revenue: Some(dec!(1800)),
                carrier_pay: Some(dec!(1100)),
                distance_miles: Some(dec!(800)),
                delivered_at: Some(date(2026, 4, 6)),
                dispatcher_id: Some(dispatcher),
                dispatcher_name: Some("Dana".to_string()),
                ..OrderRow::default()
            },
            OrderRow {
                revenue: Some(dec!(1200)),
                carrier_pay: Some(dec!(800)),
                distance_miles: Some(dec!(500)),
                delivered_at: Some(date(2026, 4, 21)),
                ..OrderRow::default()
            },
        ],
        trip_expenses: vec![
            TripExpenseRow {
                category: TripExpenseCategory::Tolls,
                amount: Some(dec!(150)),
                expense_date: Some(date(2026, 4, 6)),
            },
            TripExpenseRow {
                category: TripExpenseCategory::Fuel,
                amount: Some(dec!(300)),
                expense_date: Some(date(2026, 4, 20)),
            },
        ],
        business_expenses: vec![BusinessExpenseRow {
            category: "insurance".to_string(),
            recurrence: Recurrence::Monthly,
            amount: Some(dec!(608.75)),
            effective_from: Some(date(2026, 1, 1)),
            effective_to: None,
        }],
        fuel_entries: vec![FuelEntryRow {
            total_cost: Some(dec!(400)),
            gallons: Some(dec!(100)),
            entry_date: Some(date(2026, 4, 20)),
        }],
        invoices: vec![
            InvoiceRow {
                amount: Some(dec!(1800)),
                amount_paid: Some(dec!(800)),
                invoice_date: Some(date(2026, 4, 7)),
                due_date: Some(date(2026, 5, 7)),
                status: InvoiceStatus::Partial,
                ..InvoiceRow::default()
            },
            InvoiceRow {
                amount: Some(dec!(500)),
                invoice_date: Some(date(2026, 2, 1)),
                due_date: Some(date(2026, 3, 3)),
                status: InvoiceStatus::Overdue,
                ..InvoiceRow::default()
            },
        ],
    }
}

pub struct Fixture {
    pub state: AppState,
    pub tenant: TenantId,
    pub dispatcher: DispatcherId,
}

pub fn fixture() -> Fixture {
    let tenant = TenantId::new();
    let dispatcher = DispatcherId::new();
    let source = InMemoryDataSource::new().with_tenant(tenant, snapshot(dispatcher));
    let state = AppState::new(Arc::new(source), &AppConfig::default());
    Fixture {
        state,
        tenant,
        dispatcher,
    }
}

pub fn test_app() -> (Router, Fixture) {
    let fixture = fixture();
    (create_router(fixture.state.clone()), fixture)
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

pub async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    send(
        app,
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

pub async fn post_json(app: Router, uri: &str, body: &Value) -> (StatusCode, Value) {
    send(
        app,
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}
