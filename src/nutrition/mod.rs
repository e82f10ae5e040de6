//! Nutrition calculation module
//!
//! Handles packaged-quantity normalization to canonical grams.

pub mod quantity;

pub use quantity::{grams_per_unit, parse_quantity};
