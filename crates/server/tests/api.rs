//! Router-level tests for the transactional API surface: login, batches,
//! customers, sales, returns, chemicals and cost allocation.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{
    assert_close, create_batch, create_customer, create_sale, delete, get, post, put, test_app,
};

// ============================================================================
// Health & login
// ============================================================================

#[tokio::test]
async fn test_health_endpoints() {
    let app = test_app().await;

    let (status, _) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = get(&app, "/health/ready").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_login_accepts_demo_credentials() {
    let app = test_app().await;

    let (status, body) = post(
        &app,
        "/api/login",
        json!({ "username": "admin", "password": "admin123" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["token"].as_str().unwrap().starts_with("demo-admin-"));
    assert_eq!(body["user"]["username"], "admin");
}

#[tokio::test]
async fn test_login_rejects_bad_credentials() {
    let app = test_app().await;

    let (status, body) = post(
        &app,
        "/api/login",
        json!({ "username": "admin", "password": "nope" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid credentials");
}

// ============================================================================
// Batches
// ============================================================================

#[tokio::test]
async fn test_batch_numbers_are_sequential_and_listed_descending() {
    let app = test_app().await;

    create_batch(&app, 100.0, 85.0, "2024-01-15").await;
    create_batch(&app, 120.0, 95.0, "2024-01-20").await;
    create_batch(&app, 80.0, 70.0, "2024-01-25").await;

    let (status, body) = get(&app, "/api/batches").await;
    assert_eq!(status, StatusCode::OK);
    let batches = body.as_array().unwrap();
    assert_eq!(batches.len(), 3);

    let numbers: Vec<i64> = batches
        .iter()
        .map(|b| b["batch_number"].as_i64().unwrap())
        .collect();
    assert_eq!(numbers, vec![3, 2, 1]);
}

#[tokio::test]
async fn test_batch_validation_rejects_non_positive_latex() {
    let app = test_app().await;

    let (status, body) = post(
        &app,
        "/api/batches",
        json!({
            "latex_quantity": 0.0,
            "glue_separated": 0.0,
            "production_date": "2024-01-15",
            "cost_to_prepare": 100.0,
            "selling_price_per_kg": 250.0,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("latex_quantity"));
}

#[tokio::test]
async fn test_missing_required_fields_are_bad_requests() {
    let app = test_app().await;

    let (status, body) = post(
        &app,
        "/api/batches",
        json!({ "latex_quantity": 100.0 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_batch_creation_decrements_chemical_stock() {
    let app = test_app().await;

    // A 170 kg batch consumes the base recipe quantities exactly.
    create_batch(&app, 170.0, 150.0, "2024-02-01").await;

    let (status, body) = get(&app, "/api/chemicals").await;
    assert_eq!(status, StatusCode::OK);
    let chemicals = body.as_array().unwrap();

    let remaining = |name: &str| {
        chemicals
            .iter()
            .find(|c| c["chemical_name"] == name)
            .map(|c| c["remaining_quantity"].as_f64().unwrap())
            .unwrap()
    };

    // Defaults: 25 kg coconut oil, 10 kg KOH, 5 kg HEC, 5 kg sodium
    // benzoate, 20 L ammonia.
    assert!((remaining("Coconut Oil") - (25.0 - 0.19)).abs() < 1e-9);
    assert!((remaining("KOH") - (10.0 - 0.05)).abs() < 1e-9);
    assert!((remaining("HEC") - (5.0 - 0.135)).abs() < 1e-9);
    assert!((remaining("Sodium Benzoate") - (5.0 - 0.17)).abs() < 1e-9);
    assert!((remaining("Ammonia") - (20.0 - 0.10)).abs() < 1e-9);
}

#[tokio::test]
async fn test_batch_creation_skips_insufficient_stock() {
    let app = test_app().await;

    // Usage scales linearly; a huge batch needs more of every chemical than
    // the defaults hold, so every decrement is skipped but the batch is
    // still created.
    let (status, body) = post(
        &app,
        "/api/batches",
        json!({
            "latex_quantity": 1_000_000.0,
            "glue_separated": 850_000.0,
            "production_date": "2024-02-02",
            "cost_to_prepare": 1000.0,
            "selling_price_per_kg": 250.0,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["batch_number"], 1);

    let (_, chemicals) = get(&app, "/api/chemicals").await;
    for chemical in chemicals.as_array().unwrap() {
        assert_close(
            &chemical["remaining_quantity"],
            chemical["quantity_purchased"].as_f64().unwrap(),
        );
    }
}

#[tokio::test]
async fn test_batch_update_and_delete() {
    let app = test_app().await;

    let id = create_batch(&app, 100.0, 85.0, "2024-01-15").await;

    let (status, body) = put(
        &app,
        &format!("/api/batches/{id}"),
        json!({
            "latex_quantity": 110.0,
            "glue_separated": 90.0,
            "production_date": "2024-01-16",
            "cost_to_prepare": 16000.0,
            "selling_price_per_kg": 255.0,
            "notes": "re-weighed",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_close(&body["latex_quantity"], 110.0);
    assert_eq!(body["batch_number"], 1);
    assert_eq!(body["notes"], "re-weighed");

    let (status, _) = delete(&app, &format!("/api/batches/{id}")).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = delete(&app, &format!("/api/batches/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = put(
        &app,
        "/api/batches/9999",
        json!({
            "latex_quantity": 110.0,
            "glue_separated": 90.0,
            "production_date": "2024-01-16",
            "cost_to_prepare": 16000.0,
            "selling_price_per_kg": 255.0,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_batch_with_sales_cannot_be_deleted() {
    let app = test_app().await;

    let batch_id = create_batch(&app, 100.0, 85.0, "2024-01-15").await;
    let customer_id = create_customer(&app, "ABC Rubber Co.").await;
    create_sale(&app, batch_id, customer_id, 10.0, 250.0, "2024-01-16").await;

    let (status, body) = delete(&app, &format!("/api/batches/{batch_id}")).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("sales"));

    // Still listed.
    let (_, batches) = get(&app, "/api/batches").await;
    assert_eq!(batches.as_array().unwrap().len(), 1);
}

// ============================================================================
// Customers
// ============================================================================

#[tokio::test]
async fn test_customer_crud() {
    let app = test_app().await;

    let (status, body) = post(
        &app,
        "/api/customers",
        json!({ "name": "Lanka Exports Ltd." }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["id"].as_i64().unwrap();
    assert_eq!(body["contact_info"], "");

    let (status, _) = post(&app, "/api/customers", json!({ "name": "   " })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = put(
        &app,
        &format!("/api/customers/{id}"),
        json!({ "name": "Lanka Exports Ltd.", "contact_info": "011-234-5678" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["contact_info"], "011-234-5678");

    let (status, _) = delete(&app, &format!("/api/customers/{id}")).await;
    assert_eq!(status, StatusCode::OK);

    let (_, customers) = get(&app, "/api/customers").await;
    assert!(customers.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_customers_are_listed_alphabetically() {
    let app = test_app().await;

    create_customer(&app, "Zenith Traders").await;
    create_customer(&app, "ABC Rubber Co.").await;
    create_customer(&app, "Mid Lanka Stores").await;

    let (_, body) = get(&app, "/api/customers").await;
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        vec!["ABC Rubber Co.", "Mid Lanka Stores", "Zenith Traders"]
    );
}

// ============================================================================
// Sales
// ============================================================================

#[tokio::test]
async fn test_sale_total_is_computed_and_stored() {
    let app = test_app().await;

    let batch_id = create_batch(&app, 100.0, 85.0, "2024-01-15").await;
    let customer_id = create_customer(&app, "ABC Rubber Co.").await;

    let (status, body) = post(
        &app,
        "/api/sales",
        json!({
            "batch_id": batch_id,
            "customer_id": customer_id,
            "quantity_sold": 25.0,
            "price_per_kg": 800.0,
            "sale_date": "2024-01-16",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_close(&body["total_amount"], 20_000.0);

    let (status, body) = get(&app, "/api/sales").await;
    assert_eq!(status, StatusCode::OK);
    let sales = body.as_array().unwrap();
    assert_eq!(sales.len(), 1);
    assert_eq!(sales[0]["batch_number"], 1);
    assert_eq!(sales[0]["customer_name"], "ABC Rubber Co.");
    assert_close(&sales[0]["total_amount"], 20_000.0);
}

#[tokio::test]
async fn test_sale_against_unknown_batch_is_404() {
    let app = test_app().await;

    let customer_id = create_customer(&app, "ABC Rubber Co.").await;
    let (status, body) = post(
        &app,
        "/api/sales",
        json!({
            "batch_id": 9999,
            "customer_id": customer_id,
            "quantity_sold": 25.0,
            "price_per_kg": 800.0,
            "sale_date": "2024-01-16",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Batch or customer not found");
}

// ============================================================================
// Returns
// ============================================================================

#[tokio::test]
async fn test_return_refund_is_priced_from_parent_sale() {
    let app = test_app().await;

    let batch_id = create_batch(&app, 100.0, 85.0, "2024-01-15").await;
    let customer_id = create_customer(&app, "ABC Rubber Co.").await;
    let sale_id = create_sale(&app, batch_id, customer_id, 25.0, 800.0, "2024-01-16").await;

    let (status, body) = post(
        &app,
        "/api/returns",
        json!({
            "sale_id": sale_id,
            "return_date": "2024-01-20",
            "quantity_returned": 5.0,
            "reason": "viscosity off",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_close(&body["refund_amount"], 4_000.0);

    let (status, body) = get(&app, "/api/returns").await;
    assert_eq!(status, StatusCode::OK);
    let returns = body.as_array().unwrap();
    assert_eq!(returns.len(), 1);
    assert_eq!(returns[0]["customer_name"], "ABC Rubber Co.");
    assert_eq!(returns[0]["batch_number"], 1);
    assert_eq!(returns[0]["reason"], "viscosity off");
}

#[tokio::test]
async fn test_return_against_unknown_sale_is_404() {
    let app = test_app().await;

    let (status, body) = post(
        &app,
        "/api/returns",
        json!({
            "sale_id": 41,
            "return_date": "2024-01-20",
            "quantity_returned": 5.0,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Sale not found");
}

// ============================================================================
// Chemicals
// ============================================================================

#[tokio::test]
async fn test_chemical_unit_cost_is_derived() {
    let app = test_app().await;

    let (status, body) = post(
        &app,
        "/api/chemicals",
        json!({
            "chemical_name": "Formic Acid",
            "purchase_date": "2024-02-01",
            "quantity_purchased": 40.0,
            "unit": "L",
            "total_cost": 6000.0,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_close(&body["cost_per_unit"], 150.0);
    assert_close(&body["remaining_quantity"], 40.0);
}

#[tokio::test]
async fn test_low_stock_threshold_is_twenty_percent() {
    let app = test_app().await;

    // A fresh 0.45 kg coconut oil purchase becomes the newest row for the
    // chemical. A 340 kg batch uses 0.38 kg, leaving 0.07 kg = 15.6% of
    // the purchase, under the 20% threshold.
    let (status, _) = post(
        &app,
        "/api/chemicals",
        json!({
            "chemical_name": "Coconut Oil",
            "purchase_date": "2024-06-01",
            "quantity_purchased": 0.45,
            "unit": "kg",
            "total_cost": 135.0,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, body) = get(&app, "/api/chemicals/low-stock").await;
    assert!(body.as_array().unwrap().is_empty());

    create_batch(&app, 340.0, 300.0, "2024-06-02").await;

    let (status, body) = get(&app, "/api/chemicals/low-stock").await;
    assert_eq!(status, StatusCode::OK);
    let low = body.as_array().unwrap();
    assert_eq!(low.len(), 1);
    assert_eq!(low[0]["chemical_name"], "Coconut Oil");
    assert_close(&low[0]["remaining_quantity"], 0.07);
    let pct = low[0]["stock_percentage"].as_f64().unwrap();
    assert!((pct - 15.555_555).abs() < 1e-3);
}

// ============================================================================
// Cost allocation
// ============================================================================

#[tokio::test]
async fn test_monthly_costs_upsert_on_month() {
    let app = test_app().await;

    let (status, _) = post(
        &app,
        "/api/monthly-costs",
        json!({ "month_year": "2024-03", "labour_cost": 45000.0, "other_costs": 5000.0 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = post(
        &app,
        "/api/monthly-costs",
        json!({ "month_year": "2024-03", "labour_cost": 48000.0 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_close(&body["labour_cost"], 48_000.0);
    assert_close(&body["other_costs"], 0.0);

    let (_, body) = get(&app, "/api/monthly-costs").await;
    let march: Vec<_> = body
        .as_array()
        .unwrap()
        .iter()
        .filter(|c| c["month_year"] == "2024-03")
        .collect();
    assert_eq!(march.len(), 1);
    assert_close(&march[0]["labour_cost"], 48_000.0);
}

#[tokio::test]
async fn test_monthly_costs_reject_bad_month_key() {
    let app = test_app().await;

    let (status, _) = post(
        &app,
        "/api/monthly-costs",
        json!({ "month_year": "March 2024", "labour_cost": 45000.0 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_transport_derives_weight_and_unit_cost() {
    let app = test_app().await;

    let (status, body) = post(
        &app,
        "/api/latex-transport",
        json!({
            "transport_date": "2024-02-10",
            "total_cans": 12,
            "transport_cost": 2400.0,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_close(&body["total_latex_kg"], 240.0);
    assert_close(&body["cost_per_kg"], 10.0);
}

#[tokio::test]
async fn test_calculate_batch_cost_breakdown() {
    let app = test_app().await;

    post(
        &app,
        "/api/monthly-costs",
        json!({ "month_year": "2024-03", "labour_cost": 45000.0, "other_costs": 5000.0 }),
    )
    .await;

    // Migration defaults: transport at 10/kg; unit costs 300 (coconut),
    // 200 (KOH), 600 (HEC), 300 (sodium benzoate), 50 (ammonia).
    // Chemical cost for 170 kg: 0.19*300 + 0.05*200 + 0.135*600 +
    // 0.17*300 + 0.10*50 = 204.
    let (status, body) = post(
        &app,
        "/api/calculate-batch-cost",
        json!({ "latex_quantity": 170.0, "production_date": "2024-03-15" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_close(&body["labour_cost"], 1500.0);
    assert_close(&body["transportation_cost"], 1700.0);
    assert_close(&body["chemical_cost"], 204.0);
    assert_close(&body["total_cost"], 3404.0);

    let lines = body["chemical_breakdown"].as_array().unwrap();
    assert_eq!(lines.len(), 5);
    let coconut = lines
        .iter()
        .find(|l| l["chemical"] == "Coconut Oil")
        .unwrap();
    assert_close(&coconut["quantity_used"], 0.19);
    assert_close(&coconut["cost"], 57.0);
}

#[tokio::test]
async fn test_calculate_batch_cost_requires_monthly_costs() {
    let app = test_app().await;

    let (status, body) = post(
        &app,
        "/api/calculate-batch-cost",
        json!({ "latex_quantity": 170.0, "production_date": "1999-01-15" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("1999-01"));
}

#[tokio::test]
async fn test_calculate_batch_cost_persists_for_known_batch() {
    let app = test_app().await;

    post(
        &app,
        "/api/monthly-costs",
        json!({ "month_year": "2024-03", "labour_cost": 45000.0 }),
    )
    .await;
    let batch_id = create_batch(&app, 170.0, 150.0, "2024-03-15").await;

    let (status, _) = post(
        &app,
        "/api/calculate-batch-cost",
        json!({
            "latex_quantity": 170.0,
            "production_date": "2024-03-15",
            "batch_id": batch_id,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = post(
        &app,
        "/api/calculate-batch-cost",
        json!({
            "latex_quantity": 170.0,
            "production_date": "2024-03-15",
            "batch_id": 9999,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Batch not found");
}
