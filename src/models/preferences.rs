//! User preferences model
//!
//! Daily intake thresholds supplied with each report request.

use serde::{Deserialize, Serialize};

/// Per-day intake targets, all non-negative
///
/// `carbon_threshold` keeps its historical wire name for carbohydrates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Preferences {
    pub calorie_threshold: f64,
    pub protein_threshold: f64,
    pub carbon_threshold: f64,
    pub fat_threshold: f64,
}
