//! Router-level tests for reporting, settings and backup/restore.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use serde_json::json;

use common::{assert_close, create_batch, create_customer, create_sale, get, post, test_app};

// ============================================================================
// Analytics
// ============================================================================

#[tokio::test]
async fn test_summary_totals() {
    let app = test_app().await;

    let batch_id = create_batch(&app, 100.0, 85.0, "2024-01-15").await;
    create_batch(&app, 120.0, 95.0, "2024-01-20").await;
    let customer_id = create_customer(&app, "ABC Rubber Co.").await;
    create_sale(&app, batch_id, customer_id, 30.0, 250.0, "2024-01-16").await;
    create_sale(&app, batch_id, customer_id, 25.0, 250.0, "2024-01-18").await;

    let (status, body) = get(&app, "/api/analytics/summary").await;
    assert_eq!(status, StatusCode::OK);
    assert_close(&body["totalLatex"], 220.0);
    assert_close(&body["totalGlue"], 180.0);
    assert_close(&body["totalSales"], 13_750.0);
    // Both batches were created through the helper with the fixed
    // preparation cost of 15000.
    assert_close(&body["totalCosts"], 30_000.0);
    assert_close(&body["totalProfit"], 13_750.0 - 30_000.0);
}

#[tokio::test]
async fn test_summary_is_zero_on_empty_ledger() {
    let app = test_app().await;

    let (status, body) = get(&app, "/api/analytics/summary").await;
    assert_eq!(status, StatusCode::OK);
    assert_close(&body["totalLatex"], 0.0);
    assert_close(&body["totalSales"], 0.0);
    assert_close(&body["totalProfit"], 0.0);
}

#[tokio::test]
async fn test_monthly_production_buckets() {
    let app = test_app().await;

    create_batch(&app, 100.0, 85.0, "2024-01-15").await;
    create_batch(&app, 120.0, 95.0, "2024-01-20").await;
    create_batch(&app, 80.0, 70.0, "2024-02-05").await;

    let (status, body) = get(&app, "/api/analytics/monthly").await;
    assert_eq!(status, StatusCode::OK);
    let months = body.as_array().unwrap();
    assert_eq!(months.len(), 2);

    // Newest month first.
    assert_eq!(months[0]["month"], "2024-02");
    assert_eq!(months[0]["batches_count"], 1);
    assert_close(&months[0]["latex_used"], 80.0);

    assert_eq!(months[1]["month"], "2024-01");
    assert_eq!(months[1]["batches_count"], 2);
    assert_close(&months[1]["latex_used"], 220.0);
    assert_close(&months[1]["glue_produced"], 180.0);
}

#[tokio::test]
async fn test_profit_trends_merge_sales_and_costs() {
    let app = test_app().await;

    // January: one batch costing 15000, sales of 10000.
    let batch_id = create_batch(&app, 100.0, 85.0, "2024-01-15").await;
    let customer_id = create_customer(&app, "ABC Rubber Co.").await;
    create_sale(&app, batch_id, customer_id, 40.0, 250.0, "2024-01-16").await;
    // February: sales only.
    create_sale(&app, batch_id, customer_id, 20.0, 250.0, "2024-02-01").await;

    let (status, body) = get(&app, "/api/analytics/profit-trends").await;
    assert_eq!(status, StatusCode::OK);
    let trends = body.as_array().unwrap();
    assert_eq!(trends.len(), 2);

    assert_eq!(trends[0]["month"], "2024-02");
    assert_close(&trends[0]["revenue"], 5_000.0);
    assert_close(&trends[0]["costs"], 0.0);
    assert_close(&trends[0]["profit"], 5_000.0);
    assert_close(&trends[0]["profit_margin"], 100.0);

    assert_eq!(trends[1]["month"], "2024-01");
    assert_close(&trends[1]["revenue"], 10_000.0);
    assert_close(&trends[1]["costs"], 15_000.0);
    assert_close(&trends[1]["profit"], -5_000.0);
    assert_close(&trends[1]["profit_margin"], -50.0);
}

#[tokio::test]
async fn test_customer_profitability_ranks_by_revenue() {
    let app = test_app().await;

    let batch_id = create_batch(&app, 200.0, 170.0, "2024-01-15").await;
    let big = create_customer(&app, "Big Buyer").await;
    let small = create_customer(&app, "Small Buyer").await;
    create_sale(&app, batch_id, big, 50.0, 300.0, "2024-01-16").await;
    create_sale(&app, batch_id, big, 30.0, 250.0, "2024-02-10").await;
    create_sale(&app, batch_id, small, 10.0, 200.0, "2024-01-20").await;

    let (status, body) = get(&app, "/api/analytics/customer-profitability").await;
    assert_eq!(status, StatusCode::OK);
    let customers = body.as_array().unwrap();
    assert_eq!(customers.len(), 2);

    assert_eq!(customers[0]["name"], "Big Buyer");
    assert_eq!(customers[0]["total_orders"], 2);
    assert_close(&customers[0]["total_quantity"], 80.0);
    assert_close(&customers[0]["total_revenue"], 22_500.0);
    assert_close(&customers[0]["avg_price_per_kg"], 275.0);
    assert_eq!(customers[0]["last_order"], "2024-02-10");
    assert!(customers[0]["days_since_last_order"].as_i64().unwrap() > 0);

    assert_eq!(customers[1]["name"], "Small Buyer");
    assert_close(&customers[1]["total_revenue"], 2_000.0);
}

#[tokio::test]
async fn test_seasonal_patterns_bucket_by_calendar_month() {
    let app = test_app().await;

    let batch_id = create_batch(&app, 200.0, 170.0, "2023-01-15").await;
    let customer_id = create_customer(&app, "ABC Rubber Co.").await;
    // Two Januaries from different years land in one bucket.
    create_sale(&app, batch_id, customer_id, 10.0, 100.0, "2023-01-16").await;
    create_sale(&app, batch_id, customer_id, 30.0, 100.0, "2024-01-16").await;
    create_sale(&app, batch_id, customer_id, 5.0, 100.0, "2024-06-01").await;

    let (status, body) = get(&app, "/api/analytics/seasonal-patterns").await;
    assert_eq!(status, StatusCode::OK);
    let seasons = body.as_array().unwrap();
    assert_eq!(seasons.len(), 2);

    assert_eq!(seasons[0]["month_name"], "January");
    assert_eq!(seasons[0]["total_sales"], 2);
    assert_close(&seasons[0]["total_quantity"], 40.0);
    assert_close(&seasons[0]["avg_order_size"], 20.0);

    assert_eq!(seasons[1]["month_name"], "June");
    assert_eq!(seasons[1]["total_sales"], 1);
}

#[tokio::test]
async fn test_cost_efficiency_per_batch() {
    let app = test_app().await;

    let batch_id = create_batch(&app, 100.0, 80.0, "2024-01-15").await;
    let customer_id = create_customer(&app, "ABC Rubber Co.").await;
    create_sale(&app, batch_id, customer_id, 40.0, 500.0, "2024-01-16").await;

    let (status, body) = get(&app, "/api/analytics/cost-efficiency").await;
    assert_eq!(status, StatusCode::OK);
    let batches = body.as_array().unwrap();
    assert_eq!(batches.len(), 1);

    assert_eq!(batches[0]["batch_number"], 1);
    assert_close(&batches[0]["conversion_rate"], 80.0);
    // 15000 preparation cost over 80 kg of glue.
    assert_close(&batches[0]["cost_per_kg_glue"], 187.5);
    assert_close(&batches[0]["revenue_generated"], 20_000.0);
    assert_close(&batches[0]["profit"], 5_000.0);
}

#[tokio::test]
async fn test_waste_analysis_tracks_conversion_spread() {
    let app = test_app().await;

    create_batch(&app, 100.0, 90.0, "2024-03-01").await;
    create_batch(&app, 100.0, 70.0, "2024-03-20").await;

    let (status, body) = get(&app, "/api/analytics/waste-analysis").await;
    assert_eq!(status, StatusCode::OK);
    let months = body.as_array().unwrap();
    assert_eq!(months.len(), 1);

    assert_eq!(months[0]["month"], "2024-03");
    assert_eq!(months[0]["total_batches"], 2);
    assert_close(&months[0]["total_latex"], 200.0);
    assert_close(&months[0]["total_glue"], 160.0);
    assert_close(&months[0]["total_waste"], 40.0);
    assert_close(&months[0]["avg_conversion_rate"], 80.0);
    assert_close(&months[0]["max_conversion_rate"], 90.0);
    assert_close(&months[0]["min_conversion_rate"], 70.0);
}

#[tokio::test]
async fn test_demand_forecast_projects_recent_daily_sales() {
    let app = test_app().await;

    let batch_id = create_batch(&app, 400.0, 340.0, "2024-01-15").await;
    let customer_id = create_customer(&app, "ABC Rubber Co.").await;

    // Three daily totals sloping upward, dated relative to today so they
    // fall inside the 180-day history window.
    let today = Utc::now().date_naive();
    for (days_ago, quantity) in [(3_i64, 10.0), (2, 20.0), (1, 30.0)] {
        let date = (today - Duration::days(days_ago))
            .format("%Y-%m-%d")
            .to_string();
        create_sale(&app, batch_id, customer_id, quantity, 100.0, &date).await;
    }

    let (status, body) = get(&app, "/api/analytics/demand-forecast").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data_points"], 3);
    assert_close(&body["avg_daily_sales"], 20.0);

    let forecast = body["forecast"].as_array().unwrap();
    assert_eq!(forecast.len(), 30);
    // The history rises 10 kg/day, so the first projected day continues
    // the line at 40.
    assert_close(&forecast[0]["predicted_sales"], 40.0);
    let last = forecast.last().unwrap();
    assert!(last["predicted_sales"].as_f64().unwrap() > 40.0);
}

#[tokio::test]
async fn test_demand_forecast_is_empty_without_history() {
    let app = test_app().await;

    let (status, body) = get(&app, "/api/analytics/demand-forecast").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data_points"], 0);
    assert!(body["forecast"].as_array().unwrap().is_empty());
    assert_close(&body["avg_daily_sales"], 0.0);
}

// ============================================================================
// Settings
// ============================================================================

#[tokio::test]
async fn test_settings_default_and_update() {
    let app = test_app().await;

    let (status, body) = get(&app, "/api/settings").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["company_name"], "Rubber Glue Sales");

    let (status, body) = post(
        &app,
        "/api/settings",
        json!({
            "company_name": "Green Valley Glue Works",
            "address": "12 Estate Road",
            "phone": "077-123-4567",
            "email": "office@example.com",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["company_name"], "Green Valley Glue Works");

    let (_, body) = get(&app, "/api/settings").await;
    assert_eq!(body["company_name"], "Green Valley Glue Works");
    assert_eq!(body["address"], "12 Estate Road");

    let (status, _) = post(&app, "/api/settings", json!({ "company_name": "" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ============================================================================
// Backup / restore
// ============================================================================

#[tokio::test]
async fn test_backup_restore_round_trip() {
    let app = test_app().await;

    let batch_a = create_batch(&app, 100.0, 85.0, "2024-01-15").await;
    create_batch(&app, 120.0, 95.0, "2024-01-20").await;
    let customer_id = create_customer(&app, "ABC Rubber Co.").await;
    create_sale(&app, batch_a, customer_id, 25.0, 800.0, "2024-01-16").await;

    let (status, snapshot) = get(&app, "/api/backup").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(snapshot["batches"].as_array().unwrap().len(), 2);
    assert_eq!(snapshot["customers"].as_array().unwrap().len(), 1);
    assert_eq!(snapshot["sales"].as_array().unwrap().len(), 1);

    // Mutate the ledger after the snapshot.
    create_batch(&app, 999.0, 900.0, "2024-05-01").await;
    create_customer(&app, "Someone Else").await;

    let (status, summary) = post(&app, "/api/restore", snapshot.clone()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["batches"], 2);
    assert_eq!(summary["customers"], 1);
    assert_eq!(summary["sales"], 1);

    // The ledger matches the snapshot again.
    let (_, batches) = get(&app, "/api/batches").await;
    let batches = batches.as_array().unwrap();
    assert_eq!(batches.len(), 2);
    let numbers: Vec<i64> = batches
        .iter()
        .map(|b| b["batch_number"].as_i64().unwrap())
        .collect();
    assert_eq!(numbers, vec![2, 1]);

    let (_, sales) = get(&app, "/api/sales").await;
    let sales = sales.as_array().unwrap();
    assert_eq!(sales.len(), 1);
    assert_close(&sales[0]["total_amount"], 20_000.0);
    assert_eq!(sales[0]["customer_name"], "ABC Rubber Co.");

    // Batch numbering continues from the restored maximum.
    let (status, body) = post(
        &app,
        "/api/batches",
        json!({
            "latex_quantity": 50.0,
            "glue_separated": 40.0,
            "production_date": "2024-06-01",
            "cost_to_prepare": 8000.0,
            "selling_price_per_kg": 250.0,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["batch_number"], 3);
}
