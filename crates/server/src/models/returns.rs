//! Return domain models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use glueledger_core::{ReturnId, SaleId};

/// A customer return against a recorded sale.
///
/// `refund_amount` is computed as `quantity_returned * price_per_kg` of the
/// parent sale when the return is recorded, and stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Return {
    /// Unique return ID.
    pub id: ReturnId,
    /// Sale being returned against.
    pub sale_id: SaleId,
    /// Date the glue came back.
    pub return_date: NaiveDate,
    /// Quantity returned, in kg.
    pub quantity_returned: f64,
    /// Free-text reason.
    pub reason: String,
    /// Stored refund, `quantity_returned * sale.price_per_kg`.
    pub refund_amount: f64,
    /// When the return was recorded.
    pub created_at: DateTime<Utc>,
}

/// A return joined with sale context, as listed by `GET /api/returns`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReturnRecord {
    /// Unique return ID.
    pub id: ReturnId,
    /// Sale being returned against.
    pub sale_id: SaleId,
    /// Date the glue came back.
    pub return_date: NaiveDate,
    /// Quantity returned, in kg.
    pub quantity_returned: f64,
    /// Free-text reason.
    pub reason: String,
    /// Stored refund amount.
    pub refund_amount: f64,
    /// When the return was recorded.
    pub created_at: DateTime<Utc>,
    /// Sequential number of the batch the sale drew from.
    pub batch_number: i64,
    /// Name of the returning customer.
    pub customer_name: String,
}

/// Input for recording a return.
///
/// Cumulative returns exceeding the sale's `quantity_sold` are not rejected
/// here; the consuming UI caps what it offers.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateReturnInput {
    /// Sale being returned against.
    pub sale_id: SaleId,
    /// Date the glue came back.
    pub return_date: NaiveDate,
    /// Quantity returned, in kg.
    pub quantity_returned: f64,
    /// Free-text reason.
    pub reason: Option<String>,
}

impl CreateReturnInput {
    /// Validate field values.
    ///
    /// # Errors
    ///
    /// Returns a message naming the offending field.
    pub fn validate(&self) -> Result<(), String> {
        if !self.quantity_returned.is_finite() || self.quantity_returned <= 0.0 {
            return Err("quantity_returned must be a positive number".to_string());
        }
        Ok(())
    }
}
