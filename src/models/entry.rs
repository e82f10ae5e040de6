//! Product entry model
//!
//! Represents one consumed-product line in a report request.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

fn default_quantity() -> u32 {
    1
}

/// A consumed product: catalog code, consumption date, repeat count
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductEntry {
    pub code: String,
    pub date: NaiveDate,
    /// Number of consumed units; each unit expands to one record
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

impl ProductEntry {
    pub fn new(code: impl Into<String>, date: NaiveDate, quantity: u32) -> Self {
        Self {
            code: code.into(),
            date,
            quantity,
        }
    }
}
