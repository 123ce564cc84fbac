//! Read-only aggregation queries for reporting.
//!
//! Everything here is deterministic arithmetic over SQL aggregates. The
//! demand forecast is a closed-form least-squares line over recent daily
//! totals - nothing is trained and nothing is persisted.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate, Utc};
use sqlx::SqlitePool;

use glueledger_core::stats;

use super::RepositoryError;
use crate::models::analytics::{
    CostEfficiency, CustomerProfitability, DemandForecast, ForecastPoint, MonthlyProduction,
    ProfitTrend, SeasonalPattern, Summary, WasteAnalysis,
};

/// Days of sales history fed into the demand forecast fit.
const FORECAST_HISTORY_DAYS: i64 = 180;

/// Days projected forward by the demand forecast.
const FORECAST_HORIZON_DAYS: i64 = 30;

/// Months returned by the month-bucketed reports.
const MONTHS_REPORTED: usize = 12;

/// Repository for reporting queries.
pub struct AnalyticsRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> AnalyticsRepository<'a> {
    /// Create a new analytics repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Headline totals across all batches and sales.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn summary(&self) -> Result<Summary, RepositoryError> {
        #[derive(sqlx::FromRow)]
        struct SummaryRow {
            total_latex: f64,
            total_glue: f64,
            total_sales: f64,
            total_costs: f64,
        }

        let row = sqlx::query_as::<_, SummaryRow>(
            r"
            SELECT
                (SELECT COALESCE(SUM(latex_quantity), 0.0) FROM batches) AS total_latex,
                (SELECT COALESCE(SUM(glue_separated), 0.0) FROM batches) AS total_glue,
                (SELECT COALESCE(SUM(total_amount), 0.0) FROM sales) AS total_sales,
                (SELECT COALESCE(SUM(cost_to_prepare), 0.0) FROM batches) AS total_costs
            ",
        )
        .fetch_one(self.pool)
        .await?;

        Ok(Summary {
            total_latex: row.total_latex,
            total_glue: row.total_glue,
            total_sales: row.total_sales,
            total_costs: row.total_costs,
            total_profit: row.total_sales - row.total_costs,
        })
    }

    /// Production volume per month, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn monthly(&self) -> Result<Vec<MonthlyProduction>, RepositoryError> {
        #[derive(sqlx::FromRow)]
        struct MonthlyRow {
            month: String,
            latex_used: f64,
            glue_produced: f64,
            batches_count: i64,
        }

        let rows = sqlx::query_as::<_, MonthlyRow>(
            r"
            SELECT strftime('%Y-%m', production_date) AS month,
                   COALESCE(SUM(latex_quantity), 0.0) AS latex_used,
                   COALESCE(SUM(glue_separated), 0.0) AS glue_produced,
                   COUNT(*) AS batches_count
            FROM batches
            GROUP BY month
            ORDER BY month DESC
            LIMIT ?
            ",
        )
        .bind(MONTHS_REPORTED as i64)
        .fetch_all(self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| MonthlyProduction {
                month: r.month,
                latex_used: r.latex_used,
                glue_produced: r.glue_produced,
                batches_count: r.batches_count,
            })
            .collect())
    }

    /// Revenue vs. cost per month, newest first.
    ///
    /// Revenue is bucketed by sale month, costs by production month; the
    /// two series are merged over the union of months.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn profit_trends(&self) -> Result<Vec<ProfitTrend>, RepositoryError> {
        #[derive(sqlx::FromRow)]
        struct MonthTotalRow {
            month: String,
            total: f64,
        }

        let revenue = sqlx::query_as::<_, MonthTotalRow>(
            r"
            SELECT strftime('%Y-%m', sale_date) AS month,
                   COALESCE(SUM(total_amount), 0.0) AS total
            FROM sales
            GROUP BY month
            ",
        )
        .fetch_all(self.pool)
        .await?;

        let costs = sqlx::query_as::<_, MonthTotalRow>(
            r"
            SELECT strftime('%Y-%m', production_date) AS month,
                   COALESCE(SUM(cost_to_prepare), 0.0) AS total
            FROM batches
            GROUP BY month
            ",
        )
        .fetch_all(self.pool)
        .await?;

        let mut months: BTreeMap<String, (f64, f64)> = BTreeMap::new();
        for row in revenue {
            months.entry(row.month).or_default().0 = row.total;
        }
        for row in costs {
            months.entry(row.month).or_default().1 = row.total;
        }

        Ok(months
            .into_iter()
            .rev()
            .take(MONTHS_REPORTED)
            .map(|(month, (revenue, costs))| {
                let profit = revenue - costs;
                let profit_margin = if revenue > 0.0 {
                    profit / revenue * 100.0
                } else {
                    0.0
                };
                ProfitTrend {
                    month,
                    revenue,
                    costs,
                    profit,
                    profit_margin,
                }
            })
            .collect())
    }

    /// Lifetime buying behavior per customer, biggest spender first.
    ///
    /// Customers with no recorded sales are omitted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn customer_profitability(
        &self,
    ) -> Result<Vec<CustomerProfitability>, RepositoryError> {
        #[derive(sqlx::FromRow)]
        struct CustomerRow {
            name: String,
            contact_info: String,
            total_orders: i64,
            total_quantity: f64,
            total_revenue: f64,
            avg_price_per_kg: f64,
            last_order: String,
            days_since_last_order: i64,
        }

        let rows = sqlx::query_as::<_, CustomerRow>(
            r"
            SELECT c.name, c.contact_info,
                   COUNT(s.id) AS total_orders,
                   COALESCE(SUM(s.quantity_sold), 0.0) AS total_quantity,
                   COALESCE(SUM(s.total_amount), 0.0) AS total_revenue,
                   COALESCE(AVG(s.price_per_kg), 0.0) AS avg_price_per_kg,
                   MAX(s.sale_date) AS last_order,
                   CAST(julianday('now') - julianday(MAX(s.sale_date)) AS INTEGER)
                       AS days_since_last_order
            FROM customers c
            JOIN sales s ON s.customer_id = c.id
            GROUP BY c.id
            ORDER BY total_revenue DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| CustomerProfitability {
                name: r.name,
                contact_info: r.contact_info,
                total_orders: r.total_orders,
                total_quantity: r.total_quantity,
                total_revenue: r.total_revenue,
                avg_price_per_kg: r.avg_price_per_kg,
                last_order: r.last_order,
                days_since_last_order: r.days_since_last_order,
            })
            .collect())
    }

    /// Sales bucketed by calendar month across all years.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn seasonal_patterns(&self) -> Result<Vec<SeasonalPattern>, RepositoryError> {
        #[derive(sqlx::FromRow)]
        struct SeasonRow {
            month_num: String,
            total_sales: i64,
            total_quantity: f64,
            total_revenue: f64,
            avg_order_size: f64,
        }

        let rows = sqlx::query_as::<_, SeasonRow>(
            r"
            SELECT strftime('%m', sale_date) AS month_num,
                   COUNT(*) AS total_sales,
                   COALESCE(SUM(quantity_sold), 0.0) AS total_quantity,
                   COALESCE(SUM(total_amount), 0.0) AS total_revenue,
                   COALESCE(AVG(quantity_sold), 0.0) AS avg_order_size
            FROM sales
            GROUP BY month_num
            ORDER BY month_num
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| SeasonalPattern {
                month_name: month_name(&r.month_num).to_string(),
                total_sales: r.total_sales,
                total_quantity: r.total_quantity,
                total_revenue: r.total_revenue,
                avg_order_size: r.avg_order_size,
            })
            .collect())
    }

    /// Per-batch conversion and profitability, newest batch first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn cost_efficiency(&self) -> Result<Vec<CostEfficiency>, RepositoryError> {
        #[derive(sqlx::FromRow)]
        struct EfficiencyRow {
            batch_number: i64,
            production_date: NaiveDate,
            conversion_rate: f64,
            cost_per_kg_glue: f64,
            revenue_generated: f64,
            profit: f64,
        }

        let rows = sqlx::query_as::<_, EfficiencyRow>(
            r"
            SELECT b.batch_number, b.production_date,
                   CASE WHEN b.latex_quantity > 0
                        THEN b.glue_separated / b.latex_quantity * 100.0
                        ELSE 0.0 END AS conversion_rate,
                   CASE WHEN b.glue_separated > 0
                        THEN b.cost_to_prepare / b.glue_separated
                        ELSE 0.0 END AS cost_per_kg_glue,
                   COALESCE((SELECT SUM(s.total_amount) FROM sales s
                             WHERE s.batch_id = b.id), 0.0) AS revenue_generated,
                   COALESCE((SELECT SUM(s.total_amount) FROM sales s
                             WHERE s.batch_id = b.id), 0.0)
                       - b.cost_to_prepare AS profit
            FROM batches b
            ORDER BY b.batch_number DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| CostEfficiency {
                batch_number: r.batch_number,
                production_date: r.production_date,
                conversion_rate: r.conversion_rate,
                cost_per_kg_glue: r.cost_per_kg_glue,
                revenue_generated: r.revenue_generated,
                profit: r.profit,
            })
            .collect())
    }

    /// Conversion waste per month, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn waste_analysis(&self) -> Result<Vec<WasteAnalysis>, RepositoryError> {
        #[derive(sqlx::FromRow)]
        struct WasteRow {
            month: String,
            total_batches: i64,
            total_latex: f64,
            total_glue: f64,
            total_waste: f64,
            avg_conversion_rate: f64,
            max_conversion_rate: f64,
            min_conversion_rate: f64,
        }

        let rows = sqlx::query_as::<_, WasteRow>(
            r"
            SELECT strftime('%Y-%m', production_date) AS month,
                   COUNT(*) AS total_batches,
                   COALESCE(SUM(latex_quantity), 0.0) AS total_latex,
                   COALESCE(SUM(glue_separated), 0.0) AS total_glue,
                   COALESCE(SUM(latex_quantity - glue_separated), 0.0) AS total_waste,
                   COALESCE(AVG(CASE WHEN latex_quantity > 0
                                     THEN glue_separated / latex_quantity * 100.0
                                END), 0.0) AS avg_conversion_rate,
                   COALESCE(MAX(CASE WHEN latex_quantity > 0
                                     THEN glue_separated / latex_quantity * 100.0
                                END), 0.0) AS max_conversion_rate,
                   COALESCE(MIN(CASE WHEN latex_quantity > 0
                                     THEN glue_separated / latex_quantity * 100.0
                                END), 0.0) AS min_conversion_rate
            FROM batches
            GROUP BY month
            ORDER BY month DESC
            LIMIT ?
            ",
        )
        .bind(MONTHS_REPORTED as i64)
        .fetch_all(self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| WasteAnalysis {
                month: r.month,
                total_batches: r.total_batches,
                total_latex: r.total_latex,
                total_glue: r.total_glue,
                total_waste: r.total_waste,
                avg_conversion_rate: r.avg_conversion_rate,
                max_conversion_rate: r.max_conversion_rate,
                min_conversion_rate: r.min_conversion_rate,
            })
            .collect())
    }

    /// Fit a least-squares line over recent daily sales totals and project
    /// it forward.
    ///
    /// With fewer than two history days (or no spread in them) the forecast
    /// list is empty; the average and point count are still reported.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[allow(clippy::cast_precision_loss)] // day counts stay far below f64 precision
    pub async fn demand_forecast(&self) -> Result<DemandForecast, RepositoryError> {
        #[derive(sqlx::FromRow)]
        struct DailySalesRow {
            quantity: f64,
        }

        let history = sqlx::query_as::<_, DailySalesRow>(
            r"
            SELECT COALESCE(SUM(quantity_sold), 0.0) AS quantity
            FROM sales
            WHERE sale_date >= date('now', ?)
            GROUP BY sale_date
            ORDER BY sale_date
            ",
        )
        .bind(format!("-{FORECAST_HISTORY_DAYS} days"))
        .fetch_all(self.pool)
        .await?;

        let points: Vec<(f64, f64)> = history
            .iter()
            .enumerate()
            .map(|(i, row)| (i as f64, row.quantity))
            .collect();
        let quantities: Vec<f64> = history.iter().map(|row| row.quantity).collect();
        let avg_daily_sales = stats::mean(&quantities);

        let today = Utc::now().date_naive();
        let forecast = stats::linear_fit(&points).map_or_else(Vec::new, |fit| {
            let last_x = points.len() as f64 - 1.0;
            (1..=FORECAST_HORIZON_DAYS)
                .map(|day| ForecastPoint {
                    date: today + Duration::days(day),
                    predicted_sales: fit.predict(last_x + day as f64).max(0.0),
                })
                .collect()
        });

        Ok(DemandForecast {
            forecast,
            data_points: history.len(),
            avg_daily_sales,
        })
    }
}

/// English month name for a two-digit month number.
fn month_name(month_num: &str) -> &'static str {
    match month_num {
        "01" => "January",
        "02" => "February",
        "03" => "March",
        "04" => "April",
        "05" => "May",
        "06" => "June",
        "07" => "July",
        "08" => "August",
        "09" => "September",
        "10" => "October",
        "11" => "November",
        "12" => "December",
        _ => "Unknown",
    }
}
