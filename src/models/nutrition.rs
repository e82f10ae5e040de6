//! Shared nutrition facts structure
//!
//! Used across catalog products, scaled records, and report aggregates.

use serde::{Deserialize, Serialize};

/// Nutrition facts per 100 mass-units (or scaled totals, depending on context)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionFacts {
    pub energy_kcal: f64,
    pub fat: f64,           // grams
    pub saturated_fat: f64, // grams
    pub carbohydrates: f64, // grams
    pub sugars: f64,        // grams
    pub proteins: f64,      // grams
    pub salt: f64,          // grams
}

impl NutritionFacts {
    /// Create a new NutritionFacts with all zeros
    pub fn zero() -> Self {
        Self::default()
    }

    /// Scale all values by a multiplier
    pub fn scale(&self, multiplier: f64) -> Self {
        Self {
            energy_kcal: self.energy_kcal * multiplier,
            fat: self.fat * multiplier,
            saturated_fat: self.saturated_fat * multiplier,
            carbohydrates: self.carbohydrates * multiplier,
            sugars: self.sugars * multiplier,
            proteins: self.proteins * multiplier,
            salt: self.salt * multiplier,
        }
    }

    /// Add another facts value to this one
    pub fn add(&self, other: &NutritionFacts) -> Self {
        Self {
            energy_kcal: self.energy_kcal + other.energy_kcal,
            fat: self.fat + other.fat,
            saturated_fat: self.saturated_fat + other.saturated_fat,
            carbohydrates: self.carbohydrates + other.carbohydrates,
            sugars: self.sugars + other.sugars,
            proteins: self.proteins + other.proteins,
            salt: self.salt + other.salt,
        }
    }
}

impl std::ops::Add for NutritionFacts {
    type Output = NutritionFacts;

    fn add(self, other: NutritionFacts) -> NutritionFacts {
        NutritionFacts::add(&self, &other)
    }
}

impl std::ops::Mul<f64> for NutritionFacts {
    type Output = NutritionFacts;

    fn mul(self, multiplier: f64) -> NutritionFacts {
        self.scale(multiplier)
    }
}

impl std::iter::Sum for NutritionFacts {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(NutritionFacts::zero(), |acc, n| acc + n)
    }
}
