//! Customer CRUD handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
};

use glueledger_core::CustomerId;

use crate::db::{CustomerRepository, RepositoryError};
use crate::error::AppError;
use crate::extract::AppJson;
use crate::models::customer::{CreateCustomerInput, Customer};
use crate::state::AppState;

/// Build the customers router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/customers", get(list_customers).post(create_customer))
        .route(
            "/api/customers/{id}",
            put(update_customer).delete(delete_customer),
        )
}

/// List all customers, alphabetically.
pub async fn list_customers(
    State(state): State<AppState>,
) -> Result<Json<Vec<Customer>>, AppError> {
    let customers = CustomerRepository::new(state.pool())
        .list_customers()
        .await?;
    Ok(Json(customers))
}

/// Create a customer.
pub async fn create_customer(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateCustomerInput>,
) -> Result<(StatusCode, Json<Customer>), AppError> {
    input.validate().map_err(AppError::BadRequest)?;
    let customer = CustomerRepository::new(state.pool())
        .create_customer(&input)
        .await?;
    Ok((StatusCode::CREATED, Json(customer)))
}

/// Replace a customer's fields.
pub async fn update_customer(
    State(state): State<AppState>,
    Path(id): Path<CustomerId>,
    AppJson(input): AppJson<CreateCustomerInput>,
) -> Result<Json<Customer>, AppError> {
    input.validate().map_err(AppError::BadRequest)?;
    let customer = CustomerRepository::new(state.pool())
        .update_customer(id, &input)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => AppError::NotFound("Customer not found".to_string()),
            other => other.into(),
        })?;
    Ok(Json(customer))
}

/// Delete a customer. Customers with recorded sales are protected.
pub async fn delete_customer(
    State(state): State<AppState>,
    Path(id): Path<CustomerId>,
) -> Result<Json<serde_json::Value>, AppError> {
    let deleted = CustomerRepository::new(state.pool())
        .delete_customer(id)
        .await?;
    if !deleted {
        return Err(AppError::NotFound("Customer not found".to_string()));
    }
    Ok(Json(
        serde_json::json!({ "message": "Customer deleted successfully" }),
    ))
}
