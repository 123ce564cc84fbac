//! Return handlers. Returns are append-only: no update or delete routes.

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};

use crate::db::{RepositoryError, ReturnRepository};
use crate::error::AppError;
use crate::extract::AppJson;
use crate::models::returns::{CreateReturnInput, Return, ReturnRecord};
use crate::state::AppState;

/// Build the returns router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/returns", get(list_returns).post(create_return))
}

/// List all returns with sale context, newest first.
pub async fn list_returns(
    State(state): State<AppState>,
) -> Result<Json<Vec<ReturnRecord>>, AppError> {
    let returns = ReturnRepository::new(state.pool()).list_returns().await?;
    Ok(Json(returns))
}

/// Record a return; the refund is priced from the parent sale.
pub async fn create_return(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateReturnInput>,
) -> Result<(StatusCode, Json<Return>), AppError> {
    input.validate().map_err(AppError::BadRequest)?;
    let recorded = ReturnRepository::new(state.pool())
        .create_return(&input)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => AppError::NotFound("Sale not found".to_string()),
            other => other.into(),
        })?;
    Ok((StatusCode::CREATED, Json(recorded)))
}
