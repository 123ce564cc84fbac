//! Database operations for sales.

use chrono::NaiveDate;
use sqlx::SqlitePool;

use glueledger_core::{BatchId, CustomerId, SaleId};

use super::RepositoryError;
use crate::models::sale::{CreateSaleInput, Sale, SaleRecord};

/// Internal row type for sale queries.
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct SaleRow {
    id: i64,
    batch_id: i64,
    customer_id: i64,
    quantity_sold: f64,
    price_per_kg: f64,
    sale_date: NaiveDate,
    total_amount: f64,
}

impl From<SaleRow> for Sale {
    fn from(row: SaleRow) -> Self {
        Self {
            id: SaleId::new(row.id),
            batch_id: BatchId::new(row.batch_id),
            customer_id: CustomerId::new(row.customer_id),
            quantity_sold: row.quantity_sold,
            price_per_kg: row.price_per_kg,
            sale_date: row.sale_date,
            total_amount: row.total_amount,
        }
    }
}

/// Internal row type for the joined sale listing.
#[derive(Debug, sqlx::FromRow)]
struct SaleRecordRow {
    id: i64,
    batch_id: i64,
    customer_id: i64,
    quantity_sold: f64,
    price_per_kg: f64,
    sale_date: NaiveDate,
    total_amount: f64,
    batch_number: i64,
    customer_name: String,
}

impl From<SaleRecordRow> for SaleRecord {
    fn from(row: SaleRecordRow) -> Self {
        Self {
            id: SaleId::new(row.id),
            batch_id: BatchId::new(row.batch_id),
            customer_id: CustomerId::new(row.customer_id),
            quantity_sold: row.quantity_sold,
            price_per_kg: row.price_per_kg,
            sale_date: row.sale_date,
            total_amount: row.total_amount,
            batch_number: row.batch_number,
            customer_name: row.customer_name,
        }
    }
}

/// Repository for sale database operations.
pub struct SaleRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> SaleRepository<'a> {
    /// Create a new sale repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Record a sale. `total_amount` is computed here and stored.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the batch or customer doesn't
    /// exist. Returns `RepositoryError::Database` for other database errors.
    pub async fn create_sale(&self, input: &CreateSaleInput) -> Result<Sale, RepositoryError> {
        let row = sqlx::query_as::<_, SaleRow>(
            r"
            INSERT INTO sales (
                batch_id, customer_id, quantity_sold, price_per_kg,
                sale_date, total_amount
            )
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING id, batch_id, customer_id, quantity_sold, price_per_kg,
                      sale_date, total_amount
            ",
        )
        .bind(input.batch_id)
        .bind(input.customer_id)
        .bind(input.quantity_sold)
        .bind(input.price_per_kg)
        .bind(input.sale_date)
        .bind(input.total_amount())
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && matches!(db_err.kind(), sqlx::error::ErrorKind::ForeignKeyViolation)
            {
                return RepositoryError::NotFound;
            }
            RepositoryError::Database(e)
        })?;

        Ok(row.into())
    }

    /// List all sales with batch number and customer name, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_sales(&self) -> Result<Vec<SaleRecord>, RepositoryError> {
        let rows = sqlx::query_as::<_, SaleRecordRow>(
            r"
            SELECT s.id, s.batch_id, s.customer_id, s.quantity_sold,
                   s.price_per_kg, s.sale_date, s.total_amount,
                   b.batch_number, c.name AS customer_name
            FROM sales s
            JOIN batches b ON s.batch_id = b.id
            JOIN customers c ON s.customer_id = c.id
            ORDER BY s.sale_date DESC, s.id DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
