//! Chemical inventory handlers.

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};

use crate::db::ChemicalRepository;
use crate::error::AppError;
use crate::extract::AppJson;
use crate::models::chemical::{Chemical, CreateChemicalInput, LowStockChemical};
use crate::state::AppState;

/// Build the chemicals router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/chemicals", get(list_chemicals).post(create_chemical))
        .route("/api/chemicals/low-stock", get(list_low_stock))
}

/// List all inventory rows, alphabetically.
pub async fn list_chemicals(
    State(state): State<AppState>,
) -> Result<Json<Vec<Chemical>>, AppError> {
    let chemicals = ChemicalRepository::new(state.pool())
        .list_chemicals()
        .await?;
    Ok(Json(chemicals))
}

/// Record a chemical purchase; the unit cost is derived server-side.
pub async fn create_chemical(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateChemicalInput>,
) -> Result<(StatusCode, Json<Chemical>), AppError> {
    input.validate().map_err(AppError::BadRequest)?;
    let chemical = ChemicalRepository::new(state.pool())
        .create_chemical(&input)
        .await?;
    Ok((StatusCode::CREATED, Json(chemical)))
}

/// List chemicals with less than 20% of their purchased quantity remaining.
pub async fn list_low_stock(
    State(state): State<AppState>,
) -> Result<Json<Vec<LowStockChemical>>, AppError> {
    let chemicals = ChemicalRepository::new(state.pool())
        .list_low_stock()
        .await?;
    Ok(Json(chemicals))
}
