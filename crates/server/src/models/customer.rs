//! Customer domain models.

use serde::{Deserialize, Serialize};

use glueledger_core::CustomerId;

/// A buyer of glue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    /// Unique customer ID.
    pub id: CustomerId,
    /// Customer name.
    pub name: String,
    /// Free-text contact details (phone, address, ...).
    pub contact_info: String,
}

/// Input for creating or replacing a customer.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCustomerInput {
    /// Customer name (required, non-blank).
    pub name: String,
    /// Free-text contact details.
    pub contact_info: Option<String>,
}

impl CreateCustomerInput {
    /// Validate field values.
    ///
    /// # Errors
    ///
    /// Returns a message naming the offending field.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name is required".to_string());
        }
        Ok(())
    }
}
