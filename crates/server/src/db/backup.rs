//! Backup and restore of the core ledger collections.
//!
//! A backup is a JSON-serializable snapshot of batches, customers and
//! sales with their row IDs; restoring replaces all data from such a
//! snapshot inside one transaction, so a failed restore leaves the ledger
//! untouched.

use sqlx::SqlitePool;

use super::RepositoryError;
use super::batches::BatchRow;
use super::customers::CustomerRow;
use super::sales::SaleRow;
use crate::models::backup::{BackupDocument, RestoreSummary};

/// Repository for backup and restore operations.
pub struct BackupRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> BackupRepository<'a> {
    /// Create a new backup repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Snapshot batches, customers and sales in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn export(&self) -> Result<BackupDocument, RepositoryError> {
        let batches = sqlx::query_as::<_, BatchRow>(
            r"
            SELECT id, batch_number, latex_quantity, glue_separated,
                   production_date, cost_to_prepare, selling_price_per_kg, notes
            FROM batches ORDER BY id
            ",
        )
        .fetch_all(self.pool)
        .await?;

        let customers = sqlx::query_as::<_, CustomerRow>(
            "SELECT id, name, contact_info FROM customers ORDER BY id",
        )
        .fetch_all(self.pool)
        .await?;

        let sales = sqlx::query_as::<_, SaleRow>(
            r"
            SELECT id, batch_id, customer_id, quantity_sold, price_per_kg,
                   sale_date, total_amount
            FROM sales ORDER BY id
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(BackupDocument {
            batches: batches.into_iter().map(Into::into).collect(),
            customers: customers.into_iter().map(Into::into).collect(),
            sales: sales.into_iter().map(Into::into).collect(),
        })
    }

    /// Replace all ledger data with the snapshot, atomically.
    ///
    /// Existing returns, sales, batch cost rows, batches and customers are
    /// deleted, then the snapshot rows are re-inserted with their original
    /// IDs and batch numbers. Any failure rolls the whole operation back.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any statement fails.
    pub async fn restore(&self, doc: &BackupDocument) -> Result<RestoreSummary, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        // Delete in dependency order so foreign keys stay satisfied.
        sqlx::query("DELETE FROM returns").execute(&mut *tx).await?;
        sqlx::query("DELETE FROM sales").execute(&mut *tx).await?;
        sqlx::query("DELETE FROM batch_costs")
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM batches").execute(&mut *tx).await?;
        sqlx::query("DELETE FROM customers")
            .execute(&mut *tx)
            .await?;

        for customer in &doc.customers {
            sqlx::query("INSERT INTO customers (id, name, contact_info) VALUES (?, ?, ?)")
                .bind(customer.id)
                .bind(&customer.name)
                .bind(&customer.contact_info)
                .execute(&mut *tx)
                .await?;
        }

        for batch in &doc.batches {
            sqlx::query(
                r"
                INSERT INTO batches (
                    id, batch_number, latex_quantity, glue_separated,
                    production_date, cost_to_prepare, selling_price_per_kg, notes
                )
                VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                ",
            )
            .bind(batch.id)
            .bind(batch.batch_number)
            .bind(batch.latex_quantity)
            .bind(batch.glue_separated)
            .bind(batch.production_date)
            .bind(batch.cost_to_prepare)
            .bind(batch.selling_price_per_kg)
            .bind(&batch.notes)
            .execute(&mut *tx)
            .await?;
        }

        for sale in &doc.sales {
            sqlx::query(
                r"
                INSERT INTO sales (
                    id, batch_id, customer_id, quantity_sold, price_per_kg,
                    sale_date, total_amount
                )
                VALUES (?, ?, ?, ?, ?, ?, ?)
                ",
            )
            .bind(sale.id)
            .bind(sale.batch_id)
            .bind(sale.customer_id)
            .bind(sale.quantity_sold)
            .bind(sale.price_per_kg)
            .bind(sale.sale_date)
            .bind(sale.total_amount)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(RestoreSummary {
            batches: doc.batches.len(),
            customers: doc.customers.len(),
            sales: doc.sales.len(),
        })
    }
}
