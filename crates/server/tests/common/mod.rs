//! Shared helpers for router-level tests.
//!
//! Tests drive the real application router against an in-memory `SQLite`
//! database with the embedded migrations applied, so every request goes
//! through the same extractors, handlers and repositories as production.

#![allow(dead_code)]
#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::str::FromStr;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tower::ServiceExt;

use glueledger_server::config::AppConfig;
use glueledger_server::db::MIGRATOR;
use glueledger_server::routes;
use glueledger_server::state::AppState;

/// Build an app over a fresh in-memory database.
///
/// The pool is capped at one connection so every statement sees the same
/// in-memory database.
pub async fn test_app() -> Router {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("valid options")
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("in-memory pool");
    MIGRATOR.run(&pool).await.expect("migrations apply");

    let config = AppConfig::from_env().expect("config loads");
    routes::app(AppState::new(config, pool))
}

/// Send one request and return the status plus parsed JSON body
/// (`Value::Null` for empty or non-JSON bodies).
pub async fn request(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let request = match body {
        Some(json) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .expect("request builds"),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .expect("request builds"),
    };

    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body collects")
        .to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

/// GET a URI.
pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    request(app, "GET", uri, None).await
}

/// POST a JSON body.
pub async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    request(app, "POST", uri, Some(body)).await
}

/// PUT a JSON body.
pub async fn put(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    request(app, "PUT", uri, Some(body)).await
}

/// DELETE a URI.
pub async fn delete(app: &Router, uri: &str) -> (StatusCode, Value) {
    request(app, "DELETE", uri, None).await
}

/// Create a customer and return its ID.
pub async fn create_customer(app: &Router, name: &str) -> i64 {
    let (status, body) = post(
        app,
        "/api/customers",
        serde_json::json!({ "name": name, "contact_info": "077-000-0000" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_i64().expect("customer id")
}

/// Create a batch and return its ID.
pub async fn create_batch(app: &Router, latex: f64, glue: f64, date: &str) -> i64 {
    let (status, body) = post(
        app,
        "/api/batches",
        serde_json::json!({
            "latex_quantity": latex,
            "glue_separated": glue,
            "production_date": date,
            "cost_to_prepare": 15000.0,
            "selling_price_per_kg": 250.0,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_i64().expect("batch id")
}

/// Record a sale and return its ID.
pub async fn create_sale(
    app: &Router,
    batch_id: i64,
    customer_id: i64,
    quantity: f64,
    price: f64,
    date: &str,
) -> i64 {
    let (status, body) = post(
        app,
        "/api/sales",
        serde_json::json!({
            "batch_id": batch_id,
            "customer_id": customer_id,
            "quantity_sold": quantity,
            "price_per_kg": price,
            "sale_date": date,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_i64().expect("sale id")
}

/// Approximate float equality for JSON numbers.
pub fn assert_close(value: &Value, expected: f64) {
    let actual = value.as_f64().unwrap_or(f64::NAN);
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}
