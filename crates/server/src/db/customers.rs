//! Database operations for customers.

use sqlx::SqlitePool;

use glueledger_core::CustomerId;

use super::RepositoryError;
use crate::models::customer::{CreateCustomerInput, Customer};

/// Internal row type for customer queries.
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct CustomerRow {
    id: i64,
    name: String,
    contact_info: String,
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Self {
            id: CustomerId::new(row.id),
            name: row.name,
            contact_info: row.contact_info,
        }
    }
}

/// Repository for customer database operations.
pub struct CustomerRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CustomerRepository<'a> {
    /// Create a new customer repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a customer.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn create_customer(
        &self,
        input: &CreateCustomerInput,
    ) -> Result<Customer, RepositoryError> {
        let row = sqlx::query_as::<_, CustomerRow>(
            r"
            INSERT INTO customers (name, contact_info)
            VALUES (?, ?)
            RETURNING id, name, contact_info
            ",
        )
        .bind(input.name.trim())
        .bind(input.contact_info.clone().unwrap_or_default())
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// List all customers, alphabetically.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_customers(&self) -> Result<Vec<Customer>, RepositoryError> {
        let rows = sqlx::query_as::<_, CustomerRow>(
            "SELECT id, name, contact_info FROM customers ORDER BY name",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Replace a customer's fields.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the customer doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_customer(
        &self,
        id: CustomerId,
        input: &CreateCustomerInput,
    ) -> Result<Customer, RepositoryError> {
        let row = sqlx::query_as::<_, CustomerRow>(
            r"
            UPDATE customers
            SET name = ?, contact_info = ?
            WHERE id = ?
            RETURNING id, name, contact_info
            ",
        )
        .bind(input.name.trim())
        .bind(input.contact_info.clone().unwrap_or_default())
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        Ok(row.into())
    }

    /// Delete a customer.
    ///
    /// Customers with recorded sales are protected by the foreign key.
    ///
    /// # Returns
    ///
    /// Returns `true` if the customer was deleted, `false` if it didn't
    /// exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if sales reference the customer.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete_customer(&self, id: CustomerId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM customers WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(ref db_err) = e
                    && matches!(db_err.kind(), sqlx::error::ErrorKind::ForeignKeyViolation)
                {
                    return RepositoryError::Conflict(
                        "customer has recorded sales and cannot be deleted".to_string(),
                    );
                }
                RepositoryError::Database(e)
            })?;

        Ok(result.rows_affected() > 0)
    }
}
