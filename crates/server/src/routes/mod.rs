//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                      - Liveness check
//! GET  /health/ready                - Readiness check (DB connectivity)
//!
//! POST /api/login                   - Demo credential check
//!
//! GET    /api/batches               - List batches, newest number first
//! POST   /api/batches               - Create batch + consume chemical stock
//! PUT    /api/batches/{id}          - Full-row replace
//! DELETE /api/batches/{id}          - Delete (protected when sales exist)
//!
//! GET/POST   /api/customers         - List / create customers
//! PUT/DELETE /api/customers/{id}    - Replace / delete a customer
//!
//! GET/POST /api/sales               - List (joined) / record sales
//! GET/POST /api/returns             - List (joined) / record returns
//!
//! GET  /api/chemicals               - List inventory
//! POST /api/chemicals               - Record a purchase
//! GET  /api/chemicals/low-stock     - Rows under 20% remaining
//!
//! GET/POST /api/monthly-costs       - List / upsert month cost rows
//! GET/POST /api/latex-transport     - List / record deliveries
//! POST /api/calculate-batch-cost    - Cost breakdown (optionally persisted)
//!
//! GET/POST /api/settings            - Singleton company profile
//!
//! GET  /api/backup                  - JSON snapshot of the core tables
//! POST /api/restore                 - Destructive replace-all from snapshot
//!
//! GET  /api/analytics/...           - Read-only aggregate reports
//! ```

pub mod analytics;
pub mod auth;
pub mod backup;
pub mod batches;
pub mod chemicals;
pub mod costs;
pub mod customers;
pub mod returns;
pub mod sales;
pub mod settings;

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Router, routing::get};

use crate::state::AppState;

/// Build the full application router.
#[must_use]
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(auth::router())
        .merge(batches::router())
        .merge(customers::router())
        .merge(sales::router())
        .merge(returns::router())
        .merge(chemicals::router())
        .merge(costs::router())
        .merge(settings::router())
        .merge(backup::router())
        .merge(analytics::router())
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Verifies database connectivity before returning OK.
/// Returns 503 Service Unavailable if the database is not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match sqlx::query("SELECT 1").fetch_one(state.pool()).await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}
