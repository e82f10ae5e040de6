//! Dietary advice generation
//!
//! Deterministic template composition over the aggregation outputs: one
//! calorie paragraph, one line per out-of-band macro, one balance paragraph.

use crate::models::{DailyDeviations, DailyTotal, MacroTotals, Preferences, TopProduct, TopProducts};

/// Fixed educational closing line of the balance paragraph
pub const IDEAL_RATIO_SENTENCE: &str =
    "Ideally, your diet should consist of approximately 50% carbohydrates, 25% protein, and 25% fat. ";

/// Aggregation outputs the advice generator reads
#[derive(Debug)]
pub struct AdviceInputs<'a> {
    pub month: u32,
    pub year: i32,
    /// Zero-filled daily series for the window
    pub daily: &'a [DailyTotal],
    pub totals: &'a MacroTotals,
    pub deviations: &'a DailyDeviations,
    pub top_products: &'a TopProducts,
}

fn top_name(table: &[TopProduct]) -> Option<&str> {
    table.first().map(|p| p.name.as_str())
}

/// Compose the advice text in fixed order: calories, macros, balance
pub fn generate_dietary_advice(inputs: &AdviceInputs, preferences: &Preferences) -> String {
    let calorie_advice = calorie_paragraph(inputs, preferences);
    let macro_advice = macro_lines(inputs);
    let balance_advice = balance_paragraph(inputs.totals);

    format!("{}\n{}{}", calorie_advice, macro_advice, balance_advice)
}

// ============================================================================
// Calorie Paragraph
// ============================================================================

fn calorie_paragraph(inputs: &AdviceInputs, preferences: &Preferences) -> String {
    let threshold = preferences.calorie_threshold;

    let exceed_days = inputs
        .daily
        .iter()
        .filter(|d| d.facts.energy_kcal > threshold * 1.1)
        .count();
    let shortage_days = inputs
        .daily
        .iter()
        .filter(|d| d.facts.energy_kcal < threshold * 0.9)
        .count();

    let mean_daily = if inputs.daily.is_empty() {
        0.0
    } else {
        inputs.totals.calories / inputs.daily.len() as f64
    };
    let avg_percentage = if threshold > 0.0 {
        (mean_daily / threshold - 1.0) * 100.0
    } else {
        0.0
    };

    let deviation = inputs.deviations.calories;
    let suggestion = if deviation > 0.0 {
        match top_name(&inputs.top_products.calories) {
            Some(name) => format!(
                "You consumed too many calories on average ({:.2} kcal/day over the limit). \
                 Consider reducing or avoiding {}.",
                deviation, name
            ),
            None => format!(
                "You consumed too many calories on average ({:.2} kcal/day over the limit). \
                 Consider reducing or avoiding your highest-calorie products.",
                deviation
            ),
        }
    } else if deviation < 0.0 {
        match top_name(&inputs.top_products.calories) {
            Some(name) => format!(
                "You consumed too few calories on average ({:.2} kcal/day below the limit). \
                 Consider adding more {} or similar high-calorie foods to your diet.",
                deviation.abs(),
                name
            ),
            None => format!(
                "You consumed too few calories on average ({:.2} kcal/day below the limit). \
                 Consider adding more high-calorie foods to your diet.",
                deviation.abs()
            ),
        }
    } else {
        "Your caloric intake is within the recommended limits.".to_string()
    };

    format!(
        "In {}-{}, you exceeded your daily caloric limit {} times. You had caloric shortage on {} days. \
         On average, you consumed {:.1}% {} calories than your daily threshold. {}",
        inputs.month,
        inputs.year,
        exceed_days,
        shortage_days,
        avg_percentage,
        if avg_percentage > 0.0 { "more" } else { "less" },
        suggestion
    )
}

// ============================================================================
// Macro Lines
// ============================================================================

fn macro_lines(inputs: &AdviceInputs) -> String {
    let macros = [
        ("protein", inputs.deviations.proteins, &inputs.top_products.proteins),
        ("fat", inputs.deviations.fat, &inputs.top_products.fat),
        (
            "carbohydrates",
            inputs.deviations.carbohydrates,
            &inputs.top_products.carbohydrates,
        ),
    ];

    let mut advice = String::new();
    for (name, deviation, table) in macros {
        if deviation > 0.0 {
            match top_name(table) {
                Some(top) => advice.push_str(&format!(
                    "You consumed too much {} on average ({:.2}g/day over the limit). \
                     Consider reducing your intake of {}.\n",
                    name, deviation, top
                )),
                None => advice.push_str(&format!(
                    "You consumed too much {} on average ({:.2}g/day over the limit). \
                     Consider reducing your intake of {}-rich products.\n",
                    name, deviation, name
                )),
            }
        } else if deviation < 0.0 {
            advice.push_str(&format!(
                "You consumed too little {} on average ({:.2}g/day below the limit). \
                 Consider including more sources of {} in your diet.\n",
                name,
                deviation.abs(),
                name
            ));
        }
    }
    advice
}

// ============================================================================
// Balance Paragraph
// ============================================================================

fn balance_paragraph(totals: &MacroTotals) -> String {
    let sum = totals.proteins + totals.fat + totals.carbohydrates;
    let (carb_ratio, protein_ratio, fat_ratio) = if sum > 0.0 {
        (
            totals.carbohydrates / sum * 100.0,
            totals.proteins / sum * 100.0,
            totals.fat / sum * 100.0,
        )
    } else {
        (0.0, 0.0, 0.0)
    };

    format!(
        "Your macronutrient balance was {:.1}% carbohydrates, {:.1}% protein, and {:.1}% fat. {}",
        carb_ratio, protein_ratio, fat_ratio, IDEAL_RATIO_SENTENCE
    )
}
