//! Chemical inventory domain models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use glueledger_core::ChemicalId;

/// One purchase of a chemical, tracked until used up.
///
/// `cost_per_unit` is derived at creation as `total_cost /
/// quantity_purchased`; `remaining_quantity` starts at `quantity_purchased`
/// and is decremented by batch creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chemical {
    /// Unique inventory row ID.
    pub id: ChemicalId,
    /// Chemical name; recipe chemicals must match the names in the shared
    /// recipe table.
    pub chemical_name: String,
    /// Date of purchase.
    pub purchase_date: NaiveDate,
    /// Quantity bought.
    pub quantity_purchased: f64,
    /// Unit of measure ("kg" or "L").
    pub unit: String,
    /// Total purchase cost.
    pub total_cost: f64,
    /// Derived unit cost.
    pub cost_per_unit: f64,
    /// Stock still on hand.
    pub remaining_quantity: f64,
    /// When the row was created.
    pub created_at: DateTime<Utc>,
}

/// A chemical below the low-stock threshold, with its remaining percentage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LowStockChemical {
    /// The inventory row.
    #[serde(flatten)]
    pub chemical: Chemical,
    /// `remaining_quantity / quantity_purchased * 100`.
    pub stock_percentage: f64,
}

/// Input for recording a chemical purchase.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateChemicalInput {
    /// Chemical name.
    pub chemical_name: String,
    /// Date of purchase.
    pub purchase_date: NaiveDate,
    /// Quantity bought.
    pub quantity_purchased: f64,
    /// Unit of measure.
    pub unit: String,
    /// Total purchase cost.
    pub total_cost: f64,
}

impl CreateChemicalInput {
    /// Validate field values.
    ///
    /// # Errors
    ///
    /// Returns a message naming the first offending field.
    pub fn validate(&self) -> Result<(), String> {
        if self.chemical_name.trim().is_empty() {
            return Err("chemical_name is required".to_string());
        }
        if self.unit.trim().is_empty() {
            return Err("unit is required".to_string());
        }
        if !self.quantity_purchased.is_finite() || self.quantity_purchased <= 0.0 {
            return Err("quantity_purchased must be a positive number".to_string());
        }
        if !self.total_cost.is_finite() || self.total_cost < 0.0 {
            return Err("total_cost must be a non-negative number".to_string());
        }
        Ok(())
    }

    /// Derived unit cost stored with the row.
    #[must_use]
    pub fn cost_per_unit(&self) -> f64 {
        self.total_cost / self.quantity_purchased
    }
}
