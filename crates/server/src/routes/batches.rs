//! Batch CRUD handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};

use glueledger_core::BatchId;

use crate::db::{BatchRepository, RepositoryError};
use crate::error::AppError;
use crate::extract::AppJson;
use crate::models::batch::{Batch, CreateBatchInput};
use crate::state::AppState;

/// Build the batches router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/batches", get(list_batches).post(create_batch))
        .route(
            "/api/batches/{id}",
            axum::routing::put(update_batch).delete(delete_batch),
        )
}

/// List all batches, newest batch number first.
pub async fn list_batches(State(state): State<AppState>) -> Result<Json<Vec<Batch>>, AppError> {
    let batches = BatchRepository::new(state.pool()).list_batches().await?;
    Ok(Json(batches))
}

/// Create a batch; its sequential number is assigned server-side and the
/// recipe chemicals are consumed from inventory in the same transaction.
pub async fn create_batch(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateBatchInput>,
) -> Result<(StatusCode, Json<Batch>), AppError> {
    input.validate().map_err(AppError::BadRequest)?;
    let batch = BatchRepository::new(state.pool())
        .create_batch(&input)
        .await?;
    Ok((StatusCode::CREATED, Json(batch)))
}

/// Replace a batch's fields.
pub async fn update_batch(
    State(state): State<AppState>,
    Path(id): Path<BatchId>,
    AppJson(input): AppJson<CreateBatchInput>,
) -> Result<Json<Batch>, AppError> {
    input.validate().map_err(AppError::BadRequest)?;
    let batch = BatchRepository::new(state.pool())
        .update_batch(id, &input)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => AppError::NotFound("Batch not found".to_string()),
            other => other.into(),
        })?;
    Ok(Json(batch))
}

/// Delete a batch. Batches with recorded sales are protected.
pub async fn delete_batch(
    State(state): State<AppState>,
    Path(id): Path<BatchId>,
) -> Result<Json<serde_json::Value>, AppError> {
    let deleted = BatchRepository::new(state.pool()).delete_batch(id).await?;
    if !deleted {
        return Err(AppError::NotFound("Batch not found".to_string()));
    }
    Ok(Json(
        serde_json::json!({ "message": "Batch deleted successfully" }),
    ))
}
