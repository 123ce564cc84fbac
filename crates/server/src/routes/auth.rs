//! Login handler.

use axum::{Json, Router, extract::State, routing::post};
use uuid::Uuid;

use crate::error::AppError;
use crate::extract::AppJson;
use crate::models::auth::{LoginRequest, LoginResponse, UserInfo};
use crate::state::AppState;

/// Build the auth router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/login", post(login))
}

/// Check a username/password pair against the demo credential map.
///
/// The returned token is opaque and unchecked elsewhere; it exists so the
/// form-driven UI has something to hold on to.
///
/// # Errors
///
/// Returns 401 on bad credentials.
pub async fn login(
    State(state): State<AppState>,
    AppJson(body): AppJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    if !state.config().verify_login(&body.username, &body.password) {
        return Err(AppError::Unauthorized("Invalid credentials".to_string()));
    }

    Ok(Json(LoginResponse {
        token: format!("demo-{}-{}", body.username, Uuid::new_v4()),
        user: UserInfo {
            username: body.username,
        },
    }))
}
