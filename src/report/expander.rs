//! Record expansion
//!
//! Combines resolved catalog products with input entries: scales per-100 g
//! facts to the packaged weight and emits one record per consumed unit.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::warn;

use crate::models::{CatalogProduct, ProductEntry, ScaledRecord};
use crate::nutrition::parse_quantity;

/// Expand entries against the resolved product map
///
/// Entries whose code is unresolved are skipped; the batch continues. An
/// entry with quantity N emits N identical records dated at the entry date,
/// each carrying the full scaled serving.
pub fn expand_entries(
    entries: &[ProductEntry],
    resolved: &HashMap<String, Option<Arc<CatalogProduct>>>,
) -> Vec<ScaledRecord> {
    let mut records = Vec::new();

    for entry in entries {
        let Some(Some(product)) = resolved.get(&entry.code) else {
            warn!("product with code {} was not found, skipping entry", entry.code);
            continue;
        };

        let weight_grams = product
            .packaged_quantity
            .as_deref()
            .and_then(parse_quantity);

        // Unknown weight means the per-100 g facts are used unscaled
        let total = match weight_grams {
            Some(weight) => product.per_100g.scale(weight / 100.0),
            None => product.per_100g.clone(),
        };

        for _ in 0..entry.quantity {
            records.push(ScaledRecord {
                date: entry.date,
                name: product.name.clone(),
                nutriscore: product.nutriscore,
                categories: product.categories.clone(),
                weight_grams,
                per_100g: product.per_100g.clone(),
                total: total.clone(),
            });
        }
    }

    records
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::models::{NutriScore, NutritionFacts};

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 11, day).unwrap()
    }

    fn product(quantity: Option<&str>) -> Arc<CatalogProduct> {
        Arc::new(CatalogProduct {
            name: "Oat Flakes".to_string(),
            per_100g: NutritionFacts {
                energy_kcal: 370.0,
                fat: 7.0,
                saturated_fat: 1.2,
                carbohydrates: 58.7,
                sugars: 0.7,
                proteins: 13.5,
                salt: 0.01,
            },
            nutriscore: Some(NutriScore::A),
            categories: Some("Cereals".to_string()),
            packaged_quantity: quantity.map(String::from),
        })
    }

    fn resolved(
        code: &str,
        outcome: Option<Arc<CatalogProduct>>,
    ) -> HashMap<String, Option<Arc<CatalogProduct>>> {
        HashMap::from([(code.to_string(), outcome)])
    }

    #[test]
    fn test_quantity_repeats_records() {
        let entries = vec![ProductEntry::new("123", date(5), 3)];
        let resolved = resolved("123", Some(product(Some("500g"))));

        let records = expand_entries(&entries, &resolved);

        assert_eq!(records.len(), 3);
        for record in &records {
            assert_eq!(record.date, date(5));
            assert_eq!(record.total, records[0].total);
        }
    }

    #[test]
    fn test_scaling_by_packaged_weight() {
        let entries = vec![ProductEntry::new("123", date(1), 1)];
        let resolved = resolved("123", Some(product(Some("500g"))));

        let records = expand_entries(&entries, &resolved);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].weight_grams, Some(500.0));
        // 500 g scales the per-100 g facts five-fold
        assert_eq!(records[0].total.energy_kcal, 1850.0);
        assert_eq!(records[0].total.proteins, 67.5);
        assert_eq!(records[0].per_100g.energy_kcal, 370.0);
    }

    #[test]
    fn test_kilogram_quantity() {
        let entries = vec![ProductEntry::new("123", date(1), 1)];
        let resolved = resolved("123", Some(product(Some("1.5kg"))));

        let records = expand_entries(&entries, &resolved);
        assert_eq!(records[0].weight_grams, Some(1500.0));
        assert_eq!(records[0].total.energy_kcal, 370.0 * 15.0);
    }

    #[test]
    fn test_unparseable_quantity_uses_unscaled_facts() {
        let entries = vec![ProductEntry::new("123", date(1), 1)];
        let resolved = resolved("123", Some(product(Some("N/A"))));

        let records = expand_entries(&entries, &resolved);
        assert_eq!(records[0].weight_grams, None);
        assert_eq!(records[0].total, records[0].per_100g);
    }

    #[test]
    fn test_missing_quantity_uses_unscaled_facts() {
        let entries = vec![ProductEntry::new("123", date(1), 1)];
        let resolved = resolved("123", Some(product(None)));

        let records = expand_entries(&entries, &resolved);
        assert_eq!(records[0].weight_grams, None);
        assert_eq!(records[0].total, records[0].per_100g);
    }

    #[test]
    fn test_unresolved_entries_are_skipped() {
        let entries = vec![
            ProductEntry::new("missing", date(1), 2),
            ProductEntry::new("123", date(2), 1),
        ];
        let mut map = resolved("123", Some(product(Some("100g"))));
        map.insert("missing".to_string(), None);

        let records = expand_entries(&entries, &map);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].date, date(2));
    }
}
