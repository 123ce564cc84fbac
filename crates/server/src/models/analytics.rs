//! Reporting response types.
//!
//! Field names (including the camelCase summary keys) match what the
//! reporting screens consume.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Headline totals for the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    #[serde(rename = "totalLatex")]
    pub total_latex: f64,
    #[serde(rename = "totalGlue")]
    pub total_glue: f64,
    #[serde(rename = "totalSales")]
    pub total_sales: f64,
    #[serde(rename = "totalCosts")]
    pub total_costs: f64,
    #[serde(rename = "totalProfit")]
    pub total_profit: f64,
}

/// One month of production volume.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyProduction {
    /// Month key, `YYYY-MM`.
    pub month: String,
    pub latex_used: f64,
    pub glue_produced: f64,
    pub batches_count: i64,
}

/// One month of revenue vs. cost.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfitTrend {
    /// Month key, `YYYY-MM`.
    pub month: String,
    /// Sales revenue booked in the month.
    pub revenue: f64,
    /// Batch preparation costs booked in the month.
    pub costs: f64,
    pub profit: f64,
    /// Profit as a percentage of revenue (0 when there was no revenue).
    pub profit_margin: f64,
}

/// Lifetime buying behavior of one customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerProfitability {
    pub name: String,
    pub contact_info: String,
    pub total_orders: i64,
    pub total_quantity: f64,
    pub total_revenue: f64,
    pub avg_price_per_kg: f64,
    /// Date of the most recent order, `YYYY-MM-DD`.
    pub last_order: String,
    pub days_since_last_order: i64,
}

/// Sales aggregated by calendar month across all years.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonalPattern {
    /// English month name ("January" ... "December").
    pub month_name: String,
    pub total_sales: i64,
    pub total_quantity: f64,
    pub total_revenue: f64,
    pub avg_order_size: f64,
}

/// Per-batch production economics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostEfficiency {
    pub batch_number: i64,
    pub production_date: NaiveDate,
    /// `glue_separated / latex_quantity` as a percentage.
    pub conversion_rate: f64,
    /// Preparation cost per kg of glue produced.
    pub cost_per_kg_glue: f64,
    /// Revenue booked against the batch so far.
    pub revenue_generated: f64,
    pub profit: f64,
}

/// One month of conversion waste.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WasteAnalysis {
    /// Month key, `YYYY-MM`.
    pub month: String,
    pub total_batches: i64,
    pub total_latex: f64,
    pub total_glue: f64,
    /// Latex in minus glue out.
    pub total_waste: f64,
    pub avg_conversion_rate: f64,
    pub max_conversion_rate: f64,
    pub min_conversion_rate: f64,
}

/// One projected day of demand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    /// Projected kg sold; clamped at zero.
    pub predicted_sales: f64,
}

/// Output of the demand forecast: a least-squares line over recent daily
/// sales, projected forward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemandForecast {
    pub forecast: Vec<ForecastPoint>,
    /// Number of daily history points the fit used.
    pub data_points: usize,
    pub avg_daily_sales: f64,
}
