//! Scaled record model
//!
//! One row per physical consumed unit, carrying per-100 g facts and the
//! totals scaled to the packaged weight.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{NutriScore, NutritionFacts};

/// A dated consumption record produced by the record expander
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScaledRecord {
    pub date: NaiveDate,
    pub name: String,
    pub nutriscore: Option<NutriScore>,
    pub categories: Option<String>,
    /// Packaged weight in grams; None when the quantity string was unusable
    pub weight_grams: Option<f64>,
    /// Facts per 100 g as resolved from the catalog
    pub per_100g: NutritionFacts,
    /// Facts scaled to the packaged weight (per-100 g verbatim when unknown)
    pub total: NutritionFacts,
}
