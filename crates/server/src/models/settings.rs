//! Company settings - the singleton invoice-header profile.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The singleton company profile used for invoice headers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanySettings {
    /// Row ID (there is only ever one live row).
    pub id: i64,
    /// Company display name.
    pub company_name: String,
    /// Postal address.
    pub address: String,
    /// Contact phone.
    pub phone: String,
    /// Contact email.
    pub email: String,
    /// When the profile was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Input for `POST /api/settings`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateSettingsInput {
    /// Company display name.
    pub company_name: String,
    /// Postal address.
    pub address: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
    /// Contact email.
    pub email: Option<String>,
}

impl UpdateSettingsInput {
    /// Validate field values.
    ///
    /// # Errors
    ///
    /// Returns a message naming the offending field.
    pub fn validate(&self) -> Result<(), String> {
        if self.company_name.trim().is_empty() {
            return Err("company_name is required".to_string());
        }
        Ok(())
    }
}
