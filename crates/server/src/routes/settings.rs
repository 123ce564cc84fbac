//! Company settings handlers.

use axum::{Json, Router, extract::State, routing::get};

use crate::db::SettingsRepository;
use crate::error::AppError;
use crate::extract::AppJson;
use crate::models::settings::{CompanySettings, UpdateSettingsInput};
use crate::state::AppState;

/// Build the settings router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/settings", get(get_settings).post(update_settings))
}

/// Get the company profile, creating the default row on first read.
pub async fn get_settings(
    State(state): State<AppState>,
) -> Result<Json<CompanySettings>, AppError> {
    let settings = SettingsRepository::new(state.pool()).get_settings().await?;
    Ok(Json(settings))
}

/// Update the company profile in place.
pub async fn update_settings(
    State(state): State<AppState>,
    AppJson(input): AppJson<UpdateSettingsInput>,
) -> Result<Json<CompanySettings>, AppError> {
    input.validate().map_err(AppError::BadRequest)?;
    let settings = SettingsRepository::new(state.pool())
        .update_settings(&input)
        .await?;
    Ok(Json(settings))
}
