//! Database operations for returns.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::SqlitePool;

use glueledger_core::{ReturnId, SaleId};

use super::RepositoryError;
use crate::models::returns::{CreateReturnInput, Return, ReturnRecord};

/// Internal row type for return queries.
#[derive(Debug, sqlx::FromRow)]
struct ReturnRow {
    id: i64,
    sale_id: i64,
    return_date: NaiveDate,
    quantity_returned: f64,
    reason: String,
    refund_amount: f64,
    created_at: DateTime<Utc>,
}

impl From<ReturnRow> for Return {
    fn from(row: ReturnRow) -> Self {
        Self {
            id: ReturnId::new(row.id),
            sale_id: SaleId::new(row.sale_id),
            return_date: row.return_date,
            quantity_returned: row.quantity_returned,
            reason: row.reason,
            refund_amount: row.refund_amount,
            created_at: row.created_at,
        }
    }
}

/// Internal row type for the joined return listing.
#[derive(Debug, sqlx::FromRow)]
struct ReturnRecordRow {
    id: i64,
    sale_id: i64,
    return_date: NaiveDate,
    quantity_returned: f64,
    reason: String,
    refund_amount: f64,
    created_at: DateTime<Utc>,
    batch_number: i64,
    customer_name: String,
}

impl From<ReturnRecordRow> for ReturnRecord {
    fn from(row: ReturnRecordRow) -> Self {
        Self {
            id: ReturnId::new(row.id),
            sale_id: SaleId::new(row.sale_id),
            return_date: row.return_date,
            quantity_returned: row.quantity_returned,
            reason: row.reason,
            refund_amount: row.refund_amount,
            created_at: row.created_at,
            batch_number: row.batch_number,
            customer_name: row.customer_name,
        }
    }
}

/// Repository for return database operations.
pub struct ReturnRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ReturnRepository<'a> {
    /// Create a new return repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Record a return against a sale.
    ///
    /// The refund is priced from the parent sale:
    /// `refund_amount = quantity_returned * sale.price_per_kg`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the sale doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create_return(&self, input: &CreateReturnInput) -> Result<Return, RepositoryError> {
        let price_per_kg =
            sqlx::query_scalar::<_, f64>("SELECT price_per_kg FROM sales WHERE id = ?")
                .bind(input.sale_id)
                .fetch_optional(self.pool)
                .await?
                .ok_or(RepositoryError::NotFound)?;

        let refund_amount = input.quantity_returned * price_per_kg;

        let row = sqlx::query_as::<_, ReturnRow>(
            r"
            INSERT INTO returns (
                sale_id, return_date, quantity_returned, reason, refund_amount
            )
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, sale_id, return_date, quantity_returned, reason,
                      refund_amount, created_at
            ",
        )
        .bind(input.sale_id)
        .bind(input.return_date)
        .bind(input.quantity_returned)
        .bind(input.reason.clone().unwrap_or_default())
        .bind(refund_amount)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// List all returns with sale context, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_returns(&self) -> Result<Vec<ReturnRecord>, RepositoryError> {
        let rows = sqlx::query_as::<_, ReturnRecordRow>(
            r"
            SELECT r.id, r.sale_id, r.return_date, r.quantity_returned,
                   r.reason, r.refund_amount, r.created_at,
                   b.batch_number, c.name AS customer_name
            FROM returns r
            JOIN sales s ON r.sale_id = s.id
            JOIN batches b ON s.batch_id = b.id
            JOIN customers c ON s.customer_id = c.id
            ORDER BY r.return_date DESC, r.id DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
