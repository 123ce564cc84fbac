//! Database operations for chemical inventory.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::SqlitePool;

use glueledger_core::ChemicalId;

use super::RepositoryError;
use crate::models::chemical::{Chemical, CreateChemicalInput, LowStockChemical};

/// Remaining-stock percentage below which a chemical counts as low stock.
pub const LOW_STOCK_THRESHOLD_PERCENT: f64 = 20.0;

/// Internal row type for chemical queries.
#[derive(Debug, sqlx::FromRow)]
struct ChemicalRow {
    id: i64,
    chemical_name: String,
    purchase_date: NaiveDate,
    quantity_purchased: f64,
    unit: String,
    total_cost: f64,
    cost_per_unit: f64,
    remaining_quantity: f64,
    created_at: DateTime<Utc>,
}

impl From<ChemicalRow> for Chemical {
    fn from(row: ChemicalRow) -> Self {
        Self {
            id: ChemicalId::new(row.id),
            chemical_name: row.chemical_name,
            purchase_date: row.purchase_date,
            quantity_purchased: row.quantity_purchased,
            unit: row.unit,
            total_cost: row.total_cost,
            cost_per_unit: row.cost_per_unit,
            remaining_quantity: row.remaining_quantity,
            created_at: row.created_at,
        }
    }
}

/// Internal row type for the low-stock listing.
#[derive(Debug, sqlx::FromRow)]
struct LowStockRow {
    #[sqlx(flatten)]
    chemical: ChemicalRow,
    stock_percentage: f64,
}

impl From<LowStockRow> for LowStockChemical {
    fn from(row: LowStockRow) -> Self {
        Self {
            chemical: row.chemical.into(),
            stock_percentage: row.stock_percentage,
        }
    }
}

const CHEMICAL_COLUMNS: &str = "id, chemical_name, purchase_date, quantity_purchased, unit, \
     total_cost, cost_per_unit, remaining_quantity, created_at";

/// Repository for chemical inventory database operations.
pub struct ChemicalRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ChemicalRepository<'a> {
    /// Create a new chemical repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Record a chemical purchase.
    ///
    /// `cost_per_unit` is derived from the totals and `remaining_quantity`
    /// starts at the purchased quantity.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn create_chemical(
        &self,
        input: &CreateChemicalInput,
    ) -> Result<Chemical, RepositoryError> {
        let row = sqlx::query_as::<_, ChemicalRow>(
            r"
            INSERT INTO chemical_inventory (
                chemical_name, purchase_date, quantity_purchased, unit,
                total_cost, cost_per_unit, remaining_quantity
            )
            VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING id, chemical_name, purchase_date, quantity_purchased,
                      unit, total_cost, cost_per_unit, remaining_quantity,
                      created_at
            ",
        )
        .bind(input.chemical_name.trim())
        .bind(input.purchase_date)
        .bind(input.quantity_purchased)
        .bind(input.unit.trim())
        .bind(input.total_cost)
        .bind(input.cost_per_unit())
        .bind(input.quantity_purchased)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// List all inventory rows, alphabetically by chemical name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_chemicals(&self) -> Result<Vec<Chemical>, RepositoryError> {
        let rows = sqlx::query_as::<_, ChemicalRow>(&format!(
            "SELECT {CHEMICAL_COLUMNS} FROM chemical_inventory ORDER BY chemical_name"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// List rows whose remaining stock is under the low-stock threshold.
    ///
    /// A row qualifies iff `remaining_quantity / quantity_purchased * 100 <
    /// 20`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_low_stock(&self) -> Result<Vec<LowStockChemical>, RepositoryError> {
        let rows = sqlx::query_as::<_, LowStockRow>(&format!(
            r"
            SELECT {CHEMICAL_COLUMNS},
                   remaining_quantity / quantity_purchased * 100.0 AS stock_percentage
            FROM chemical_inventory
            WHERE quantity_purchased > 0
              AND remaining_quantity / quantity_purchased * 100.0 < ?
            ORDER BY stock_percentage
            "
        ))
        .bind(LOW_STOCK_THRESHOLD_PERCENT)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
