//! The fixed chemical recipe for one production batch.
//!
//! The factory's base recipe is expressed against 170 kg of latex; chemical
//! usage for any other batch size scales linearly from that baseline. This
//! table is the single source of truth for the ratios - batch creation, cost
//! calculation and the tests all read from here.

/// Latex quantity the base recipe is expressed against, in kg.
pub const BASELINE_LATEX_KG: f64 = 170.0;

/// One chemical line of the base recipe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecipeComponent {
    /// Chemical name, matching `chemical_inventory.chemical_name`.
    pub chemical: &'static str,
    /// Quantity consumed by a baseline (170 kg) batch.
    pub quantity: f64,
    /// Unit of `quantity` ("kg" or "L").
    pub unit: &'static str,
}

impl RecipeComponent {
    /// Usage for a batch of `latex_quantity` kg, scaled linearly from the
    /// baseline.
    #[must_use]
    pub fn usage_for(&self, latex_quantity: f64) -> f64 {
        self.quantity * latex_quantity / BASELINE_LATEX_KG
    }
}

/// The five-chemical base recipe for a 170 kg latex batch.
pub const BASE_RECIPE: [RecipeComponent; 5] = [
    RecipeComponent {
        chemical: "Coconut Oil",
        quantity: 0.19,
        unit: "kg",
    },
    RecipeComponent {
        chemical: "KOH",
        quantity: 0.05,
        unit: "kg",
    },
    RecipeComponent {
        chemical: "HEC",
        quantity: 0.135,
        unit: "kg",
    },
    RecipeComponent {
        chemical: "Sodium Benzoate",
        quantity: 0.17,
        unit: "kg",
    },
    RecipeComponent {
        chemical: "Ammonia",
        quantity: 0.10,
        unit: "L",
    },
];
