//! Sale domain models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use glueledger_core::{BatchId, CustomerId, SaleId};

/// A sale of glue from one batch to one customer.
///
/// `total_amount` is computed as `quantity_sold * price_per_kg` when the
/// sale is recorded and stored, never recomputed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sale {
    /// Unique sale ID.
    pub id: SaleId,
    /// Batch the glue came from.
    pub batch_id: BatchId,
    /// Buying customer.
    pub customer_id: CustomerId,
    /// Quantity sold, in kg.
    pub quantity_sold: f64,
    /// Agreed price per kg.
    pub price_per_kg: f64,
    /// Date of sale.
    pub sale_date: NaiveDate,
    /// Stored total, `quantity_sold * price_per_kg`.
    pub total_amount: f64,
}

/// A sale joined with its batch number and customer name, as listed by
/// `GET /api/sales`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleRecord {
    /// Unique sale ID.
    pub id: SaleId,
    /// Batch the glue came from.
    pub batch_id: BatchId,
    /// Buying customer.
    pub customer_id: CustomerId,
    /// Quantity sold, in kg.
    pub quantity_sold: f64,
    /// Agreed price per kg.
    pub price_per_kg: f64,
    /// Date of sale.
    pub sale_date: NaiveDate,
    /// Stored total, `quantity_sold * price_per_kg`.
    pub total_amount: f64,
    /// Sequential number of the source batch.
    pub batch_number: i64,
    /// Name of the buying customer.
    pub customer_name: String,
}

/// Input for recording a sale.
///
/// There is deliberately no check that `quantity_sold` stays within the
/// batch's remaining output; the consuming UI filters what it offers.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSaleInput {
    /// Batch the glue comes from.
    pub batch_id: BatchId,
    /// Buying customer.
    pub customer_id: CustomerId,
    /// Quantity sold, in kg.
    pub quantity_sold: f64,
    /// Agreed price per kg.
    pub price_per_kg: f64,
    /// Date of sale.
    pub sale_date: NaiveDate,
}

impl CreateSaleInput {
    /// Validate field values.
    ///
    /// # Errors
    ///
    /// Returns a message naming the first offending field.
    pub fn validate(&self) -> Result<(), String> {
        if !self.quantity_sold.is_finite() || self.quantity_sold <= 0.0 {
            return Err("quantity_sold must be a positive number".to_string());
        }
        if !self.price_per_kg.is_finite() || self.price_per_kg < 0.0 {
            return Err("price_per_kg must be a non-negative number".to_string());
        }
        Ok(())
    }

    /// The stored total for this sale.
    #[must_use]
    pub fn total_amount(&self) -> f64 {
        self.quantity_sold * self.price_per_kg
    }
}
