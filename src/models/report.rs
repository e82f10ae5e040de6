//! Monthly report model
//!
//! The read-only aggregate handed to the (external) renderer: scalar totals,
//! resampled series, ranked tables, anomaly flags, and advice text.

use chrono::NaiveDate;
use serde::Serialize;

use super::{NutriScore, NutritionFacts};

/// Calorie and macro totals over the report window
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MacroTotals {
    pub calories: f64,
    pub proteins: f64,
    pub carbohydrates: f64,
    pub fat: f64,
}

/// Signed per-day deviation from each threshold
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DailyDeviations {
    pub calories: f64,
    pub proteins: f64,
    pub carbohydrates: f64,
    pub fat: f64,
}

/// Facts summed over one calendar day
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub facts: NutritionFacts,
}

/// Facts summed over one calendar week (weeks start on Sunday)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyTotal {
    pub week_start: NaiveDate,
    pub calories: f64,
    pub proteins: f64,
    pub carbohydrates: f64,
    pub fat: f64,
}

/// One row of a ranked contributor table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopProduct {
    pub name: String,
    pub total: f64,
    /// Share of the window total, percent, rounded to 2 decimals
    pub percentage: f64,
}

/// Ranked contributor tables per column
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TopProducts {
    pub calories: Vec<TopProduct>,
    pub proteins: Vec<TopProduct>,
    pub carbohydrates: Vec<TopProduct>,
    pub fat: Vec<TopProduct>,
}

/// Days whose value strays beyond the z-score band
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OutlierDays {
    pub high: Vec<NaiveDate>,
    pub low: Vec<NaiveDate>,
}

/// Outlier-day flags per column
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OutlierSummary {
    pub calories: OutlierDays,
    pub proteins: OutlierDays,
    pub carbohydrates: OutlierDays,
    pub fat: OutlierDays,
}

/// Nutri-Score rollup over the window's records
///
/// The average maps grades to the 5-1 scale, rounds half away from zero,
/// and maps back. Records without a grade are excluded.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NutriScoreSummary {
    pub average_grade: Option<NutriScore>,
    /// Records carrying a grade worse than C
    pub below_c: usize,
}

/// The complete monthly report, rebuilt fresh per request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyReport {
    pub month: u32,
    pub year: i32,
    /// Days of the target month counted as already passed
    pub days_elapsed: u32,
    pub totals: MacroTotals,
    /// Population standard deviation of daily calories
    pub calorie_std: f64,
    pub deviations: DailyDeviations,
    /// Zero-filled daily series covering every day of the month
    pub daily: Vec<DailyTotal>,
    /// Ordered week buckets partitioning the daily series
    pub weekly: Vec<WeeklyTotal>,
    pub top_products: TopProducts,
    pub outliers: OutlierSummary,
    pub nutriscore: NutriScoreSummary,
    pub advice: String,
}
