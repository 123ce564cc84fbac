//! Cost-allocation handlers: monthly costs, latex transport and batch cost
//! calculation.

use axum::{Json, Router, extract::State, http::StatusCode, routing::{get, post}};

use crate::db::{BatchRepository, CostRepository, RepositoryError};
use crate::error::AppError;
use crate::extract::AppJson;
use crate::models::cost::{
    BatchCostBreakdown, CalculateBatchCostInput, CreateTransportInput, LatexTransport,
    MonthlyCost, UpsertMonthlyCostInput,
};
use crate::state::AppState;

/// Build the costs router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/monthly-costs",
            get(list_monthly_costs).post(upsert_monthly_cost),
        )
        .route(
            "/api/latex-transport",
            get(list_transport).post(create_transport),
        )
        .route("/api/calculate-batch-cost", post(calculate_batch_cost))
}

/// List monthly cost rows, newest month first.
pub async fn list_monthly_costs(
    State(state): State<AppState>,
) -> Result<Json<Vec<MonthlyCost>>, AppError> {
    let costs = CostRepository::new(state.pool()).list_monthly_costs().await?;
    Ok(Json(costs))
}

/// Insert or update the cost row for a month.
pub async fn upsert_monthly_cost(
    State(state): State<AppState>,
    AppJson(input): AppJson<UpsertMonthlyCostInput>,
) -> Result<Json<MonthlyCost>, AppError> {
    input.validate().map_err(AppError::BadRequest)?;
    let cost = CostRepository::new(state.pool())
        .upsert_monthly_cost(&input)
        .await?;
    Ok(Json(cost))
}

/// List latex deliveries, newest first.
pub async fn list_transport(
    State(state): State<AppState>,
) -> Result<Json<Vec<LatexTransport>>, AppError> {
    let transports = CostRepository::new(state.pool()).list_transport().await?;
    Ok(Json(transports))
}

/// Record a latex delivery; weight and unit cost are derived server-side.
pub async fn create_transport(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateTransportInput>,
) -> Result<(StatusCode, Json<LatexTransport>), AppError> {
    input.validate().map_err(AppError::BadRequest)?;
    let transport = CostRepository::new(state.pool())
        .create_transport(&input)
        .await?;
    Ok((StatusCode::CREATED, Json(transport)))
}

/// Compute (and optionally persist) a batch's production cost breakdown.
///
/// Fails with 400 when no monthly cost row exists for the production
/// month, mirroring what the cost screen expects.
pub async fn calculate_batch_cost(
    State(state): State<AppState>,
    AppJson(input): AppJson<CalculateBatchCostInput>,
) -> Result<Json<BatchCostBreakdown>, AppError> {
    input.validate().map_err(AppError::BadRequest)?;

    // Resolve the batch up front so a bad reference reads as 404, not as a
    // failed insert.
    if let Some(batch_id) = input.batch_id {
        BatchRepository::new(state.pool())
            .get_batch(batch_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Batch not found".to_string()))?;
    }

    let month = input.month_key();
    let breakdown = CostRepository::new(state.pool())
        .calculate_batch_cost(&input)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => {
                AppError::BadRequest(format!("No monthly costs recorded for {month}"))
            }
            other => other.into(),
        })?;
    Ok(Json(breakdown))
}
