//! Database operations for production batches.

use chrono::NaiveDate;
use sqlx::SqlitePool;

use glueledger_core::BatchId;
use glueledger_core::recipe::BASE_RECIPE;

use super::RepositoryError;
use crate::models::batch::{Batch, CreateBatchInput};

/// Internal row type for batch queries.
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct BatchRow {
    id: i64,
    batch_number: i64,
    latex_quantity: f64,
    glue_separated: f64,
    production_date: NaiveDate,
    cost_to_prepare: f64,
    selling_price_per_kg: f64,
    notes: String,
}

impl From<BatchRow> for Batch {
    fn from(row: BatchRow) -> Self {
        Self {
            id: BatchId::new(row.id),
            batch_number: row.batch_number,
            latex_quantity: row.latex_quantity,
            glue_separated: row.glue_separated,
            production_date: row.production_date,
            cost_to_prepare: row.cost_to_prepare,
            selling_price_per_kg: row.selling_price_per_kg,
            notes: row.notes,
        }
    }
}

const BATCH_COLUMNS: &str = "id, batch_number, latex_quantity, glue_separated, \
     production_date, cost_to_prepare, selling_price_per_kg, notes";

/// Repository for batch database operations.
pub struct BatchRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> BatchRepository<'a> {
    /// Create a new batch repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a batch and consume chemical stock for it, atomically.
    ///
    /// The batch number is assigned as `max(existing) + 1` inside the insert
    /// statement. Each recipe chemical's newest inventory row is decremented
    /// by the usage scaled from the 170 kg baseline; a chemical whose newest
    /// row lacks sufficient stock is skipped and logged, not failed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any statement fails; the whole
    /// operation rolls back in that case.
    pub async fn create_batch(&self, input: &CreateBatchInput) -> Result<Batch, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, BatchRow>(
            r"
            INSERT INTO batches (
                batch_number, latex_quantity, glue_separated,
                production_date, cost_to_prepare, selling_price_per_kg, notes
            )
            VALUES (
                (SELECT COALESCE(MAX(batch_number), 0) + 1 FROM batches),
                ?, ?, ?, ?, ?, ?
            )
            RETURNING id, batch_number, latex_quantity, glue_separated,
                      production_date, cost_to_prepare, selling_price_per_kg, notes
            ",
        )
        .bind(input.latex_quantity)
        .bind(input.glue_separated)
        .bind(input.production_date)
        .bind(input.cost_to_prepare)
        .bind(input.selling_price_per_kg)
        .bind(input.notes.clone().unwrap_or_default())
        .fetch_one(&mut *tx)
        .await?;

        for component in &BASE_RECIPE {
            let usage = component.usage_for(input.latex_quantity);
            let updated = sqlx::query(
                r"
                UPDATE chemical_inventory
                SET remaining_quantity = remaining_quantity - ?
                WHERE id = (
                    SELECT id FROM chemical_inventory
                    WHERE chemical_name = ?
                    ORDER BY purchase_date DESC, id DESC
                    LIMIT 1
                )
                AND remaining_quantity >= ?
                ",
            )
            .bind(usage)
            .bind(component.chemical)
            .bind(usage)
            .execute(&mut *tx)
            .await?;

            if updated.rows_affected() == 0 {
                tracing::warn!(
                    chemical = component.chemical,
                    needed = usage,
                    batch_number = row.batch_number,
                    "insufficient chemical stock, skipping inventory decrement"
                );
            }
        }

        tx.commit().await?;
        Ok(row.into())
    }

    /// List all batches, newest batch number first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_batches(&self) -> Result<Vec<Batch>, RepositoryError> {
        let rows = sqlx::query_as::<_, BatchRow>(&format!(
            "SELECT {BATCH_COLUMNS} FROM batches ORDER BY batch_number DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Get a batch by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_batch(&self, id: BatchId) -> Result<Option<Batch>, RepositoryError> {
        let row = sqlx::query_as::<_, BatchRow>(&format!(
            "SELECT {BATCH_COLUMNS} FROM batches WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Replace a batch's fields (full-row update; the batch number is kept).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the batch doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_batch(
        &self,
        id: BatchId,
        input: &CreateBatchInput,
    ) -> Result<Batch, RepositoryError> {
        let row = sqlx::query_as::<_, BatchRow>(
            r"
            UPDATE batches
            SET latex_quantity = ?, glue_separated = ?, production_date = ?,
                cost_to_prepare = ?, selling_price_per_kg = ?, notes = ?
            WHERE id = ?
            RETURNING id, batch_number, latex_quantity, glue_separated,
                      production_date, cost_to_prepare, selling_price_per_kg, notes
            ",
        )
        .bind(input.latex_quantity)
        .bind(input.glue_separated)
        .bind(input.production_date)
        .bind(input.cost_to_prepare)
        .bind(input.selling_price_per_kg)
        .bind(input.notes.clone().unwrap_or_default())
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        Ok(row.into())
    }

    /// Delete a batch.
    ///
    /// Batches with recorded sales are protected by the foreign key and
    /// reported as a conflict instead of being orphaned.
    ///
    /// # Returns
    ///
    /// Returns `true` if the batch was deleted, `false` if it didn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if sales reference the batch.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete_batch(&self, id: BatchId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM batches WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(ref db_err) = e
                    && matches!(db_err.kind(), sqlx::error::ErrorKind::ForeignKeyViolation)
                {
                    return RepositoryError::Conflict(
                        "batch has recorded sales and cannot be deleted".to_string(),
                    );
                }
                RepositoryError::Database(e)
            })?;

        Ok(result.rows_affected() > 0)
    }
}
