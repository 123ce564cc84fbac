//! Sale handlers. Sales are append-only: no update or delete routes.

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};

use crate::db::{RepositoryError, SaleRepository};
use crate::error::AppError;
use crate::extract::AppJson;
use crate::models::sale::{CreateSaleInput, Sale, SaleRecord};
use crate::state::AppState;

/// Build the sales router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/sales", get(list_sales).post(create_sale))
}

/// List all sales with batch number and customer name, newest first.
pub async fn list_sales(State(state): State<AppState>) -> Result<Json<Vec<SaleRecord>>, AppError> {
    let sales = SaleRepository::new(state.pool()).list_sales().await?;
    Ok(Json(sales))
}

/// Record a sale; `total_amount` is computed and stored server-side.
pub async fn create_sale(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateSaleInput>,
) -> Result<(StatusCode, Json<Sale>), AppError> {
    input.validate().map_err(AppError::BadRequest)?;
    let sale = SaleRepository::new(state.pool())
        .create_sale(&input)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => {
                AppError::NotFound("Batch or customer not found".to_string())
            }
            other => other.into(),
        })?;
    Ok((StatusCode::CREATED, Json(sale)))
}
