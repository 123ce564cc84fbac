//! Reporting handlers. All read-only aggregates.

use axum::{Json, Router, extract::State, routing::get};

use crate::db::AnalyticsRepository;
use crate::error::AppError;
use crate::models::analytics::{
    CostEfficiency, CustomerProfitability, DemandForecast, MonthlyProduction, ProfitTrend,
    SeasonalPattern, Summary, WasteAnalysis,
};
use crate::state::AppState;

/// Build the analytics router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/analytics/summary", get(summary))
        .route("/api/analytics/monthly", get(monthly))
        .route("/api/analytics/profit-trends", get(profit_trends))
        .route(
            "/api/analytics/customer-profitability",
            get(customer_profitability),
        )
        .route("/api/analytics/seasonal-patterns", get(seasonal_patterns))
        .route("/api/analytics/cost-efficiency", get(cost_efficiency))
        .route("/api/analytics/waste-analysis", get(waste_analysis))
        .route("/api/analytics/demand-forecast", get(demand_forecast))
}

/// Headline totals for the dashboard.
pub async fn summary(State(state): State<AppState>) -> Result<Json<Summary>, AppError> {
    Ok(Json(AnalyticsRepository::new(state.pool()).summary().await?))
}

/// Production volume per month.
pub async fn monthly(
    State(state): State<AppState>,
) -> Result<Json<Vec<MonthlyProduction>>, AppError> {
    Ok(Json(AnalyticsRepository::new(state.pool()).monthly().await?))
}

/// Revenue vs. cost per month.
pub async fn profit_trends(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProfitTrend>>, AppError> {
    Ok(Json(
        AnalyticsRepository::new(state.pool()).profit_trends().await?,
    ))
}

/// Lifetime buying behavior per customer.
pub async fn customer_profitability(
    State(state): State<AppState>,
) -> Result<Json<Vec<CustomerProfitability>>, AppError> {
    Ok(Json(
        AnalyticsRepository::new(state.pool())
            .customer_profitability()
            .await?,
    ))
}

/// Sales bucketed by calendar month.
pub async fn seasonal_patterns(
    State(state): State<AppState>,
) -> Result<Json<Vec<SeasonalPattern>>, AppError> {
    Ok(Json(
        AnalyticsRepository::new(state.pool())
            .seasonal_patterns()
            .await?,
    ))
}

/// Per-batch conversion and profitability.
pub async fn cost_efficiency(
    State(state): State<AppState>,
) -> Result<Json<Vec<CostEfficiency>>, AppError> {
    Ok(Json(
        AnalyticsRepository::new(state.pool()).cost_efficiency().await?,
    ))
}

/// Conversion waste per month.
pub async fn waste_analysis(
    State(state): State<AppState>,
) -> Result<Json<Vec<WasteAnalysis>>, AppError> {
    Ok(Json(
        AnalyticsRepository::new(state.pool()).waste_analysis().await?,
    ))
}

/// Least-squares projection of daily sales.
pub async fn demand_forecast(
    State(state): State<AppState>,
) -> Result<Json<DemandForecast>, AppError> {
    Ok(Json(
        AnalyticsRepository::new(state.pool()).demand_forecast().await?,
    ))
}
