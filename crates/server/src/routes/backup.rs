//! Backup and restore handlers.

use axum::{Json, Router, extract::State, routing::{get, post}};

use crate::db::BackupRepository;
use crate::error::AppError;
use crate::extract::AppJson;
use crate::models::backup::{BackupDocument, RestoreSummary};
use crate::state::AppState;

/// Build the backup router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/backup", get(backup))
        .route("/api/restore", post(restore))
}

/// Download a JSON snapshot of batches, customers and sales.
pub async fn backup(State(state): State<AppState>) -> Result<Json<BackupDocument>, AppError> {
    let doc = BackupRepository::new(state.pool()).export().await?;
    Ok(Json(doc))
}

/// Replace all ledger data from a snapshot. Destructive; runs in a single
/// transaction and rolls back wholly on any failure.
pub async fn restore(
    State(state): State<AppState>,
    AppJson(doc): AppJson<BackupDocument>,
) -> Result<Json<RestoreSummary>, AppError> {
    let summary = BackupRepository::new(state.pool()).restore(&doc).await?;
    tracing::info!(
        batches = summary.batches,
        customers = summary.customers,
        sales = summary.sales,
        "ledger restored from snapshot"
    );
    Ok(Json(summary))
}
