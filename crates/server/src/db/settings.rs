//! Database operations for the singleton company settings row.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use super::RepositoryError;
use crate::models::settings::{CompanySettings, UpdateSettingsInput};

/// Internal row type for settings queries.
#[derive(Debug, sqlx::FromRow)]
struct SettingsRow {
    id: i64,
    company_name: String,
    address: String,
    phone: String,
    email: String,
    updated_at: DateTime<Utc>,
}

impl From<SettingsRow> for CompanySettings {
    fn from(row: SettingsRow) -> Self {
        Self {
            id: row.id,
            company_name: row.company_name,
            address: row.address,
            phone: row.phone,
            email: row.email,
            updated_at: row.updated_at,
        }
    }
}

const SETTINGS_COLUMNS: &str = "id, company_name, address, phone, email, updated_at";

/// Repository for company settings.
pub struct SettingsRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> SettingsRepository<'a> {
    /// Create a new settings repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Get the company profile, creating the default row if none exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn get_settings(&self) -> Result<CompanySettings, RepositoryError> {
        let existing = sqlx::query_as::<_, SettingsRow>(&format!(
            "SELECT {SETTINGS_COLUMNS} FROM company_settings ORDER BY id LIMIT 1"
        ))
        .fetch_optional(self.pool)
        .await?;

        if let Some(row) = existing {
            return Ok(row.into());
        }

        let row = sqlx::query_as::<_, SettingsRow>(&format!(
            "INSERT INTO company_settings DEFAULT VALUES RETURNING {SETTINGS_COLUMNS}"
        ))
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Update the company profile in place.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn update_settings(
        &self,
        input: &UpdateSettingsInput,
    ) -> Result<CompanySettings, RepositoryError> {
        // Make sure the singleton row exists before updating it.
        let current = self.get_settings().await?;

        let row = sqlx::query_as::<_, SettingsRow>(&format!(
            r"
            UPDATE company_settings
            SET company_name = ?, address = ?, phone = ?, email = ?,
                updated_at = datetime('now')
            WHERE id = ?
            RETURNING {SETTINGS_COLUMNS}
            "
        ))
        .bind(input.company_name.trim())
        .bind(input.address.clone().unwrap_or_default())
        .bind(input.phone.clone().unwrap_or_default())
        .bind(input.email.clone().unwrap_or_default())
        .bind(current.id)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }
}
