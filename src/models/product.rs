//! Catalog product model
//!
//! The resolved catalog row for a product code, and the Nutri-Score grade.

use serde::{Deserialize, Serialize};

use super::NutritionFacts;

/// Nutri-Score grade, A (best) through E (worst)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NutriScore {
    A,
    B,
    C,
    D,
    E,
}

impl NutriScore {
    /// Numeric value on the 5 (best) to 1 (worst) scale
    pub fn score(&self) -> u8 {
        match self {
            NutriScore::A => 5,
            NutriScore::B => 4,
            NutriScore::C => 3,
            NutriScore::D => 2,
            NutriScore::E => 1,
        }
    }

    /// Map a numeric value back to a grade
    pub fn from_score(score: u8) -> Option<Self> {
        match score {
            5 => Some(NutriScore::A),
            4 => Some(NutriScore::B),
            3 => Some(NutriScore::C),
            2 => Some(NutriScore::D),
            1 => Some(NutriScore::E),
            _ => None,
        }
    }

    /// Parse a catalog grade string; unknown grades map to None
    pub fn from_grade(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "a" => Some(NutriScore::A),
            "b" => Some(NutriScore::B),
            "c" => Some(NutriScore::C),
            "d" => Some(NutriScore::D),
            "e" => Some(NutriScore::E),
            _ => None,
        }
    }

    pub fn as_letter(&self) -> &'static str {
        match self {
            NutriScore::A => "A",
            NutriScore::B => "B",
            NutriScore::C => "C",
            NutriScore::D => "D",
            NutriScore::E => "E",
        }
    }
}

/// A product as resolved from the external catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogProduct {
    pub name: String,
    /// Nutrition facts per 100 g
    pub per_100g: NutritionFacts,
    pub nutriscore: Option<NutriScore>,
    pub categories: Option<String>,
    /// Packaged quantity string as published by the catalog (e.g. "500g")
    pub packaged_quantity: Option<String>,
}
