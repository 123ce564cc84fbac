//! Production batch domain models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use glueledger_core::BatchId;

/// A production run converting latex into glue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Batch {
    /// Unique batch ID.
    pub id: BatchId,
    /// Sequential batch number, assigned at insert as max + 1. Distinct
    /// from the primary key.
    pub batch_number: i64,
    /// Latex input, in kg.
    pub latex_quantity: f64,
    /// Glue output, in kg. Expected (not enforced) to be at most
    /// `latex_quantity`.
    pub glue_separated: f64,
    /// Date of production.
    pub production_date: NaiveDate,
    /// Preparation cost recorded for the batch.
    pub cost_to_prepare: f64,
    /// Intended selling price per kg of glue.
    pub selling_price_per_kg: f64,
    /// Free-text notes.
    pub notes: String,
}

/// Input for creating a batch. Also used for `PUT`, which is a full-row
/// replace.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBatchInput {
    /// Latex input, in kg.
    pub latex_quantity: f64,
    /// Glue output, in kg.
    pub glue_separated: f64,
    /// Date of production.
    pub production_date: NaiveDate,
    /// Preparation cost recorded for the batch.
    pub cost_to_prepare: f64,
    /// Intended selling price per kg of glue.
    pub selling_price_per_kg: f64,
    /// Free-text notes.
    pub notes: Option<String>,
}

impl CreateBatchInput {
    /// Validate field values.
    ///
    /// # Errors
    ///
    /// Returns a message naming the first offending field.
    pub fn validate(&self) -> Result<(), String> {
        if !self.latex_quantity.is_finite() || self.latex_quantity <= 0.0 {
            return Err("latex_quantity must be a positive number".to_string());
        }
        if !self.glue_separated.is_finite() || self.glue_separated < 0.0 {
            return Err("glue_separated must be a non-negative number".to_string());
        }
        if !self.cost_to_prepare.is_finite() || self.cost_to_prepare < 0.0 {
            return Err("cost_to_prepare must be a non-negative number".to_string());
        }
        if !self.selling_price_per_kg.is_finite() || self.selling_price_per_kg < 0.0 {
            return Err("selling_price_per_kg must be a non-negative number".to_string());
        }
        Ok(())
    }
}
