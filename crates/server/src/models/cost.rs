//! Cost-allocation domain models: monthly costs, latex transport and the
//! per-batch cost breakdown.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use glueledger_core::{BatchId, MonthlyCostId, TransportId};

/// Cans-to-kg conversion used by transport records: one can holds 20 kg of
/// latex.
pub const LATEX_KG_PER_CAN: f64 = 20.0;

/// Days a monthly cost is spread across when allocating to a single batch.
pub const DAYS_PER_MONTH: f64 = 30.0;

/// Labour and sundry costs recorded once per calendar month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyCost {
    /// Unique row ID.
    pub id: MonthlyCostId,
    /// Month key, `YYYY-MM`.
    pub month_year: String,
    /// Labour cost for the month.
    pub labour_cost: f64,
    /// Other overheads for the month.
    pub other_costs: f64,
    /// When the row was created.
    pub created_at: DateTime<Utc>,
}

/// Input for `POST /api/monthly-costs`. Upserts on `month_year`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertMonthlyCostInput {
    /// Month key, `YYYY-MM`.
    pub month_year: String,
    /// Labour cost for the month.
    pub labour_cost: f64,
    /// Other overheads for the month.
    pub other_costs: Option<f64>,
}

impl UpsertMonthlyCostInput {
    /// Validate field values.
    ///
    /// # Errors
    ///
    /// Returns a message naming the first offending field.
    pub fn validate(&self) -> Result<(), String> {
        if !is_month_key(&self.month_year) {
            return Err("month_year must have the form YYYY-MM".to_string());
        }
        if !self.labour_cost.is_finite() || self.labour_cost < 0.0 {
            return Err("labour_cost must be a non-negative number".to_string());
        }
        if let Some(other) = self.other_costs
            && (!other.is_finite() || other < 0.0)
        {
            return Err("other_costs must be a non-negative number".to_string());
        }
        Ok(())
    }
}

/// A latex delivery from the rubber land.
///
/// `total_latex_kg` and `cost_per_kg` are derived at creation:
/// `total_latex_kg = total_cans * 20`, `cost_per_kg = transport_cost /
/// total_latex_kg`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LatexTransport {
    /// Unique row ID.
    pub id: TransportId,
    /// Date of delivery.
    pub transport_date: NaiveDate,
    /// Cans delivered.
    pub total_cans: i64,
    /// Derived latex weight.
    pub total_latex_kg: f64,
    /// Total transport cost.
    pub transport_cost: f64,
    /// Derived transport cost per kg of latex.
    pub cost_per_kg: f64,
    /// Free-text notes.
    pub notes: String,
    /// When the row was created.
    pub created_at: DateTime<Utc>,
}

/// Input for recording a latex delivery.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTransportInput {
    /// Date of delivery.
    pub transport_date: NaiveDate,
    /// Cans delivered.
    pub total_cans: i64,
    /// Total transport cost.
    pub transport_cost: f64,
    /// Free-text notes.
    pub notes: Option<String>,
}

impl CreateTransportInput {
    /// Validate field values.
    ///
    /// # Errors
    ///
    /// Returns a message naming the first offending field.
    pub fn validate(&self) -> Result<(), String> {
        if self.total_cans <= 0 {
            return Err("total_cans must be a positive number".to_string());
        }
        if !self.transport_cost.is_finite() || self.transport_cost < 0.0 {
            return Err("transport_cost must be a non-negative number".to_string());
        }
        Ok(())
    }

    /// Derived latex weight for this delivery.
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // can counts stay far below f64 precision
    pub fn total_latex_kg(&self) -> f64 {
        self.total_cans as f64 * LATEX_KG_PER_CAN
    }

    /// Derived transport cost per kg of latex.
    #[must_use]
    pub fn cost_per_kg(&self) -> f64 {
        self.transport_cost / self.total_latex_kg()
    }
}

/// Input for `POST /api/calculate-batch-cost`.
#[derive(Debug, Clone, Deserialize)]
pub struct CalculateBatchCostInput {
    /// Latex input the batch would use, in kg.
    pub latex_quantity: f64,
    /// Production date; selects the monthly cost row by its `YYYY-MM`.
    pub production_date: NaiveDate,
    /// When set, the computed breakdown is also persisted against this
    /// batch.
    pub batch_id: Option<BatchId>,
}

impl CalculateBatchCostInput {
    /// Validate field values.
    ///
    /// # Errors
    ///
    /// Returns a message naming the offending field.
    pub fn validate(&self) -> Result<(), String> {
        if !self.latex_quantity.is_finite() || self.latex_quantity <= 0.0 {
            return Err("latex_quantity must be a positive number".to_string());
        }
        Ok(())
    }

    /// The `YYYY-MM` key of the production month.
    #[must_use]
    pub fn month_key(&self) -> String {
        self.production_date.format("%Y-%m").to_string()
    }
}

/// One chemical line of a batch cost breakdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChemicalCostLine {
    /// Chemical name.
    pub chemical: String,
    /// Scaled usage for the batch.
    pub quantity_used: f64,
    /// Unit of `quantity_used`.
    pub unit: String,
    /// `quantity_used` times the chemical's inventory `cost_per_unit`
    /// (0 when the chemical has no inventory row).
    pub cost: f64,
}

/// The breakdown returned by `POST /api/calculate-batch-cost`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchCostBreakdown {
    /// One day's share of the month's labour cost.
    pub labour_cost: f64,
    /// Latex quantity times the latest transport cost per kg.
    pub transportation_cost: f64,
    /// Sum of the chemical lines.
    pub chemical_cost: f64,
    /// Per-chemical detail.
    pub chemical_breakdown: Vec<ChemicalCostLine>,
    /// `labour_cost + transportation_cost + chemical_cost`.
    pub total_cost: f64,
}

/// True when `value` looks like a `YYYY-MM` month key.
fn is_month_key(value: &str) -> bool {
    let mut parts = value.splitn(2, '-');
    let year_ok = parts
        .next()
        .is_some_and(|y| y.len() == 4 && y.chars().all(|c| c.is_ascii_digit()));
    let month_ok = parts.next().is_some_and(|m| {
        m.len() == 2 && m.parse::<u8>().is_ok_and(|n| (1..=12).contains(&n))
    });
    year_ok && month_ok
}
