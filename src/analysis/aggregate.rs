//! Aggregation engine
//!
//! Turns the flat scaled-record set into the monthly report: window filter,
//! daily and weekly resampling, totals, threshold deviations, outlier days,
//! ranked contributors, and the Nutri-Score rollup.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use crate::analysis::advice::{generate_dietary_advice, AdviceInputs};
use crate::analysis::calendar::{days_passed_in_month, week_start};
use crate::models::{
    DailyDeviations, DailyTotal, MacroTotals, MonthlyReport, NutriScore, NutriScoreSummary,
    NutritionFacts, OutlierDays, OutlierSummary, Preferences, ScaledRecord, TopProduct,
    TopProducts, WeeklyTotal,
};
use crate::report::ReportError;

/// Z-score band for outlier-day detection
pub const DEFAULT_Z_THRESHOLD: f64 = 1.5;

/// Rows kept in each ranked contributor table
pub const TOP_PRODUCTS_LIMIT: usize = 5;

// ============================================================================
// Column Selection
// ============================================================================

/// A numeric facts column the engine aggregates over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacroColumn {
    Calories,
    Proteins,
    Carbohydrates,
    Fat,
}

impl MacroColumn {
    /// Read this column out of a facts value
    pub fn of(self, facts: &NutritionFacts) -> f64 {
        match self {
            MacroColumn::Calories => facts.energy_kcal,
            MacroColumn::Proteins => facts.proteins,
            MacroColumn::Carbohydrates => facts.carbohydrates,
            MacroColumn::Fat => facts.fat,
        }
    }
}

// ============================================================================
// Resampling
// ============================================================================

/// Pure projection of the record set onto a calendar month
pub fn filter_month(records: &[ScaledRecord], month: u32, year: i32) -> Vec<&ScaledRecord> {
    records
        .iter()
        .filter(|r| r.date.month() == month && r.date.year() == year)
        .collect()
}

/// Sum facts by calendar day and fill the gaps with zero
///
/// The returned series covers every day of `first`'s month, so mean and
/// standard deviation computed over it see the whole calendar month. An
/// empty input yields an empty series.
pub fn daily_series(records: &[&ScaledRecord], first: NaiveDate) -> Vec<DailyTotal> {
    if records.is_empty() {
        return Vec::new();
    }

    let mut by_day: BTreeMap<NaiveDate, NutritionFacts> = BTreeMap::new();
    for record in records {
        let entry = by_day.entry(record.date).or_insert_with(NutritionFacts::zero);
        *entry = entry.add(&record.total);
    }

    first
        .iter_days()
        .take_while(|d| d.month() == first.month())
        .map(|date| DailyTotal {
            date,
            facts: by_day.get(&date).cloned().unwrap_or_default(),
        })
        .collect()
}

/// Re-bucket the daily series into Sunday-anchored calendar weeks
pub fn weekly_series(daily: &[DailyTotal]) -> Result<Vec<WeeklyTotal>, ReportError> {
    let mut by_week: BTreeMap<NaiveDate, NutritionFacts> = BTreeMap::new();
    for day in daily {
        let start = week_start(day.date).ok_or_else(|| ReportError::Aggregation {
            stage: "weekly_resampling",
            message: format!("no week start for {}", day.date),
        })?;
        let entry = by_week.entry(start).or_insert_with(NutritionFacts::zero);
        *entry = entry.add(&day.facts);
    }

    Ok(by_week
        .into_iter()
        .map(|(start, facts)| WeeklyTotal {
            week_start: start,
            calories: facts.energy_kcal,
            proteins: facts.proteins,
            carbohydrates: facts.carbohydrates,
            fat: facts.fat,
        })
        .collect())
}

// ============================================================================
// Totals and Deviations
// ============================================================================

/// Calorie and macro totals over the filtered window
pub fn macro_totals(records: &[&ScaledRecord]) -> MacroTotals {
    let mut totals = MacroTotals::default();
    for record in records {
        totals.calories += record.total.energy_kcal;
        totals.proteins += record.total.proteins;
        totals.carbohydrates += record.total.carbohydrates;
        totals.fat += record.total.fat;
    }
    totals
}

/// Signed per-day deviation of a period total from a daily threshold
///
/// Zero elapsed days yields 0 rather than a division error.
pub fn daily_deviation(total: f64, threshold: f64, days_elapsed: u32) -> f64 {
    if days_elapsed == 0 {
        return 0.0;
    }
    (total - threshold * days_elapsed as f64) / days_elapsed as f64
}

fn daily_deviations(
    totals: &MacroTotals,
    preferences: &Preferences,
    days_elapsed: u32,
) -> DailyDeviations {
    DailyDeviations {
        calories: daily_deviation(totals.calories, preferences.calorie_threshold, days_elapsed),
        proteins: daily_deviation(totals.proteins, preferences.protein_threshold, days_elapsed),
        carbohydrates: daily_deviation(
            totals.carbohydrates,
            preferences.carbon_threshold,
            days_elapsed,
        ),
        fat: daily_deviation(totals.fat, preferences.fat_threshold, days_elapsed),
    }
}

// ============================================================================
// Statistics
// ============================================================================

/// Population standard deviation (divide by n) over the window
pub fn population_std_dev(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let variance =
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Flag days straying beyond `mean ± z · std` for one column
pub fn outlier_days(daily: &[DailyTotal], column: MacroColumn, z_threshold: f64) -> OutlierDays {
    if daily.is_empty() {
        return OutlierDays::default();
    }

    let values: Vec<f64> = daily.iter().map(|d| column.of(&d.facts)).collect();
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let std_dev = population_std_dev(&values, mean);

    let mut outliers = OutlierDays::default();
    for (day, value) in daily.iter().zip(&values) {
        if *value > mean + z_threshold * std_dev {
            outliers.high.push(day.date);
        } else if *value < mean - z_threshold * std_dev {
            outliers.low.push(day.date);
        }
    }
    outliers
}

// ============================================================================
// Ranked Contributors
// ============================================================================

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Top products by one column, annotated with their share of the window total
pub fn top_products(records: &[&ScaledRecord], column: MacroColumn, top_n: usize) -> Vec<TopProduct> {
    let mut by_name: BTreeMap<&str, f64> = BTreeMap::new();
    let mut window_total = 0.0;
    for record in records {
        let value = column.of(&record.total);
        *by_name.entry(record.name.as_str()).or_insert(0.0) += value;
        window_total += value;
    }

    let mut ranked: Vec<(&str, f64)> = by_name.into_iter().collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked.truncate(top_n);

    ranked
        .into_iter()
        .map(|(name, total)| TopProduct {
            name: name.to_string(),
            total,
            percentage: if window_total > 0.0 {
                round2(total / window_total * 100.0)
            } else {
                0.0
            },
        })
        .collect()
}

// ============================================================================
// Nutri-Score
// ============================================================================

/// Average the window's known grades and count those worse than C
pub fn nutriscore_summary(records: &[&ScaledRecord]) -> NutriScoreSummary {
    let scores: Vec<u8> = records
        .iter()
        .filter_map(|r| r.nutriscore.map(|g| g.score()))
        .collect();

    let below_c = scores.iter().filter(|&&s| s < NutriScore::C.score()).count();

    let average_grade = if scores.is_empty() {
        None
    } else {
        let mean = scores.iter().map(|&s| s as f64).sum::<f64>() / scores.len() as f64;
        // Half away from zero, then back onto the letter scale
        NutriScore::from_score(mean.round() as u8)
    };

    NutriScoreSummary {
        average_grade,
        below_c,
    }
}

// ============================================================================
// Report Assembly
// ============================================================================

/// Build the complete monthly report for one calendar window
///
/// Pure over its inputs; `today` is injected so reports are reproducible.
pub fn build_monthly_report(
    records: &[ScaledRecord],
    preferences: &Preferences,
    month: u32,
    year: i32,
    today: NaiveDate,
) -> Result<MonthlyReport, ReportError> {
    let first =
        NaiveDate::from_ymd_opt(year, month, 1).ok_or(ReportError::InvalidWindow { month, year })?;

    let filtered = filter_month(records, month, year);
    let daily = daily_series(&filtered, first);
    let weekly = weekly_series(&daily)?;

    let totals = macro_totals(&filtered);
    let days_elapsed = days_passed_in_month(month, year, today);
    let deviations = daily_deviations(&totals, preferences, days_elapsed);

    let calorie_values: Vec<f64> = daily.iter().map(|d| d.facts.energy_kcal).collect();
    let calorie_mean = if calorie_values.is_empty() {
        0.0
    } else {
        calorie_values.iter().sum::<f64>() / calorie_values.len() as f64
    };
    let calorie_std = population_std_dev(&calorie_values, calorie_mean);

    let outliers = OutlierSummary {
        calories: outlier_days(&daily, MacroColumn::Calories, DEFAULT_Z_THRESHOLD),
        proteins: outlier_days(&daily, MacroColumn::Proteins, DEFAULT_Z_THRESHOLD),
        carbohydrates: outlier_days(&daily, MacroColumn::Carbohydrates, DEFAULT_Z_THRESHOLD),
        fat: outlier_days(&daily, MacroColumn::Fat, DEFAULT_Z_THRESHOLD),
    };

    let top = TopProducts {
        calories: top_products(&filtered, MacroColumn::Calories, TOP_PRODUCTS_LIMIT),
        proteins: top_products(&filtered, MacroColumn::Proteins, TOP_PRODUCTS_LIMIT),
        carbohydrates: top_products(&filtered, MacroColumn::Carbohydrates, TOP_PRODUCTS_LIMIT),
        fat: top_products(&filtered, MacroColumn::Fat, TOP_PRODUCTS_LIMIT),
    };

    let nutriscore = nutriscore_summary(&filtered);

    let advice = generate_dietary_advice(
        &AdviceInputs {
            month,
            year,
            daily: &daily,
            totals: &totals,
            deviations: &deviations,
            top_products: &top,
        },
        preferences,
    );

    Ok(MonthlyReport {
        month,
        year,
        days_elapsed,
        totals,
        calorie_std,
        deviations,
        daily,
        weekly,
        top_products: top,
        outliers,
        nutriscore,
        advice,
    })
}
