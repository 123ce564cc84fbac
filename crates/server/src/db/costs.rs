//! Database operations for cost allocation: monthly costs, latex transport
//! and the per-batch cost breakdown.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::SqlitePool;

use glueledger_core::recipe::BASE_RECIPE;
use glueledger_core::{MonthlyCostId, TransportId};

use super::RepositoryError;
use crate::models::cost::{
    BatchCostBreakdown, CalculateBatchCostInput, ChemicalCostLine, CreateTransportInput,
    DAYS_PER_MONTH, LatexTransport, MonthlyCost, UpsertMonthlyCostInput,
};

/// Internal row type for monthly cost queries.
#[derive(Debug, sqlx::FromRow)]
struct MonthlyCostRow {
    id: i64,
    month_year: String,
    labour_cost: f64,
    other_costs: f64,
    created_at: DateTime<Utc>,
}

impl From<MonthlyCostRow> for MonthlyCost {
    fn from(row: MonthlyCostRow) -> Self {
        Self {
            id: MonthlyCostId::new(row.id),
            month_year: row.month_year,
            labour_cost: row.labour_cost,
            other_costs: row.other_costs,
            created_at: row.created_at,
        }
    }
}

/// Internal row type for transport queries.
#[derive(Debug, sqlx::FromRow)]
struct TransportRow {
    id: i64,
    transport_date: NaiveDate,
    total_cans: i64,
    total_latex_kg: f64,
    transport_cost: f64,
    cost_per_kg: f64,
    notes: String,
    created_at: DateTime<Utc>,
}

impl From<TransportRow> for LatexTransport {
    fn from(row: TransportRow) -> Self {
        Self {
            id: TransportId::new(row.id),
            transport_date: row.transport_date,
            total_cans: row.total_cans,
            total_latex_kg: row.total_latex_kg,
            transport_cost: row.transport_cost,
            cost_per_kg: row.cost_per_kg,
            notes: row.notes,
            created_at: row.created_at,
        }
    }
}

/// Newest unit cost on file for one chemical.
#[derive(Debug, sqlx::FromRow)]
struct UnitCostRow {
    cost_per_unit: f64,
}

/// Repository for cost-allocation database operations.
pub struct CostRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CostRepository<'a> {
    /// Create a new cost repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    // =========================================================================
    // Monthly costs
    // =========================================================================

    /// List monthly cost rows, newest month first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_monthly_costs(&self) -> Result<Vec<MonthlyCost>, RepositoryError> {
        let rows = sqlx::query_as::<_, MonthlyCostRow>(
            r"
            SELECT id, month_year, labour_cost, other_costs, created_at
            FROM monthly_costs
            ORDER BY month_year DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Insert or update the cost row for a month.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn upsert_monthly_cost(
        &self,
        input: &UpsertMonthlyCostInput,
    ) -> Result<MonthlyCost, RepositoryError> {
        let row = sqlx::query_as::<_, MonthlyCostRow>(
            r"
            INSERT INTO monthly_costs (month_year, labour_cost, other_costs)
            VALUES (?, ?, ?)
            ON CONFLICT (month_year) DO UPDATE SET
                labour_cost = excluded.labour_cost,
                other_costs = excluded.other_costs
            RETURNING id, month_year, labour_cost, other_costs, created_at
            ",
        )
        .bind(&input.month_year)
        .bind(input.labour_cost)
        .bind(input.other_costs.unwrap_or(0.0))
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    // =========================================================================
    // Latex transport
    // =========================================================================

    /// List transport rows, newest delivery first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_transport(&self) -> Result<Vec<LatexTransport>, RepositoryError> {
        let rows = sqlx::query_as::<_, TransportRow>(
            r"
            SELECT id, transport_date, total_cans, total_latex_kg,
                   transport_cost, cost_per_kg, notes, created_at
            FROM latex_transport
            ORDER BY transport_date DESC, id DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Record a latex delivery; weight and unit cost are derived from the
    /// can count.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn create_transport(
        &self,
        input: &CreateTransportInput,
    ) -> Result<LatexTransport, RepositoryError> {
        let row = sqlx::query_as::<_, TransportRow>(
            r"
            INSERT INTO latex_transport (
                transport_date, total_cans, total_latex_kg, transport_cost,
                cost_per_kg, notes
            )
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING id, transport_date, total_cans, total_latex_kg,
                      transport_cost, cost_per_kg, notes, created_at
            ",
        )
        .bind(input.transport_date)
        .bind(input.total_cans)
        .bind(input.total_latex_kg())
        .bind(input.transport_cost)
        .bind(input.cost_per_kg())
        .bind(input.notes.clone().unwrap_or_default())
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    // =========================================================================
    // Batch cost calculation
    // =========================================================================

    /// Compute the production cost breakdown for a hypothetical or real
    /// batch.
    ///
    /// Labour is one day's share of the production month's labour cost,
    /// transport is the latex quantity priced at the newest delivery's cost
    /// per kg (0 when no delivery is on file), and chemicals are the scaled
    /// recipe usage priced at each chemical's newest inventory unit cost.
    /// When `input.batch_id` is set the breakdown is also persisted to
    /// `batch_costs`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no monthly cost row exists for
    /// the production month. Returns `RepositoryError::Database` for other
    /// database errors.
    pub async fn calculate_batch_cost(
        &self,
        input: &CalculateBatchCostInput,
    ) -> Result<BatchCostBreakdown, RepositoryError> {
        let monthly_labour = sqlx::query_scalar::<_, f64>(
            "SELECT labour_cost FROM monthly_costs WHERE month_year = ?",
        )
        .bind(input.month_key())
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        let transport_per_kg = sqlx::query_scalar::<_, f64>(
            r"
            SELECT cost_per_kg FROM latex_transport
            ORDER BY transport_date DESC, id DESC
            LIMIT 1
            ",
        )
        .fetch_optional(self.pool)
        .await?
        .unwrap_or(0.0);

        let mut chemical_breakdown = Vec::with_capacity(BASE_RECIPE.len());
        let mut chemical_cost = 0.0;
        for component in &BASE_RECIPE {
            let quantity_used = component.usage_for(input.latex_quantity);
            let unit_cost = sqlx::query_as::<_, UnitCostRow>(
                r"
                SELECT cost_per_unit FROM chemical_inventory
                WHERE chemical_name = ?
                ORDER BY purchase_date DESC, id DESC
                LIMIT 1
                ",
            )
            .bind(component.chemical)
            .fetch_optional(self.pool)
            .await?
            .map_or(0.0, |row| row.cost_per_unit);

            let cost = quantity_used * unit_cost;
            chemical_cost += cost;
            chemical_breakdown.push(ChemicalCostLine {
                chemical: component.chemical.to_string(),
                quantity_used,
                unit: component.unit.to_string(),
                cost,
            });
        }

        let labour_cost = monthly_labour / DAYS_PER_MONTH;
        let transportation_cost = input.latex_quantity * transport_per_kg;
        let total_cost = labour_cost + transportation_cost + chemical_cost;

        let breakdown = BatchCostBreakdown {
            labour_cost,
            transportation_cost,
            chemical_cost,
            chemical_breakdown,
            total_cost,
        };

        if let Some(batch_id) = input.batch_id {
            sqlx::query(
                r"
                INSERT INTO batch_costs (
                    batch_id, labour_cost, transportation_cost, chemical_cost,
                    total_cost
                )
                VALUES (?, ?, ?, ?, ?)
                ",
            )
            .bind(batch_id)
            .bind(breakdown.labour_cost)
            .bind(breakdown.transportation_cost)
            .bind(breakdown.chemical_cost)
            .bind(breakdown.total_cost)
            .execute(self.pool)
            .await?;
        }

        Ok(breakdown)
    }
}
