//! Packaged-quantity normalization
//!
//! Parses free-form catalog quantity strings ("500g", "1.5kg", "1l") into a
//! canonical mass in grams. Unknown units and unparseable strings yield
//! None, meaning the per-100 g facts are used unscaled.

// ============================================================================
// Conversion Constants (to grams)
// ============================================================================

/// Grams per kilogram
pub const G_PER_KG: f64 = 1000.0;
/// Grams per liter, assuming density 1
pub const G_PER_L: f64 = 1000.0;

// ============================================================================
// Unit Recognition
// ============================================================================

/// Get the conversion factor to grams for a packaged-quantity unit
///
/// Liquids are assumed to have density 1, so liters and milliliters convert
/// like kilograms and grams.
pub fn grams_per_unit(unit: &str) -> Option<f64> {
    let lower = unit.to_lowercase();
    let trimmed = lower.trim();

    match trimmed {
        "g" | "gram" | "grams" => Some(1.0),
        "kg" | "kilogram" | "kilograms" => Some(G_PER_KG),
        "l" | "liter" | "liters" | "litre" | "litres" => Some(G_PER_L),
        "ml" | "milliliter" | "milliliters" | "millilitre" | "millilitres" => Some(1.0),
        _ => None,
    }
}

/// Parse a quantity string into a weight in grams
///
/// Accepts `<number><unit>` with optional whitespace between; anything after
/// the unit token is ignored ("500 g net" parses as 500 g). Returns None for
/// unknown units or unparseable input; malformed strings are a legitimate
/// "weight unknown" outcome, never an error.
pub fn parse_quantity(quantity_str: &str) -> Option<f64> {
    let (value, unit) = split_number_and_unit(quantity_str)?;
    let factor = grams_per_unit(unit)?;
    Some(value * factor)
}

/// Split a leading numeric value ("12", "1.5") from the unit token behind it
fn split_number_and_unit(s: &str) -> Option<(f64, &str)> {
    let bytes = s.as_bytes();
    let mut end = 0;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == 0 {
        return None;
    }
    // Optional fraction: one dot followed by digits
    if end < bytes.len() && bytes[end] == b'.' {
        let mut frac = end + 1;
        while frac < bytes.len() && bytes[frac].is_ascii_digit() {
            frac += 1;
        }
        if frac > end + 1 {
            end = frac;
        }
    }

    let value: f64 = s[..end].parse().ok()?;

    let rest = s[end..].trim_start();
    let unit_len = rest
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(rest.len());
    if unit_len == 0 {
        return None;
    }

    Some((value, &rest[..unit_len]))
}
