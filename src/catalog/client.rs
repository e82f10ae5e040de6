//! Catalog lookup client
//!
//! Defines the lookup capability consumed by the resolver and implements it
//! against an Open Food Facts style v2 product endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, StatusCode};
use serde::Deserialize;
use thiserror::Error;

use crate::build_info;
use crate::models::{CatalogProduct, NutriScore, NutritionFacts};

/// Default public catalog endpoint
pub const DEFAULT_BASE_URL: &str = "https://world.openfoodfacts.org";

/// Request timeout in seconds
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Connection timeout in seconds
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Transient catalog lookup failure
///
/// Anything here is retryable; an authoritative "no such product" is
/// `Ok(None)` from the lookup, not an error.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("catalog request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("catalog returned HTTP {0}")]
    Status(StatusCode),
}

/// External catalog lookup capability
///
/// `Ok(Some)` is a resolved product, `Ok(None)` is authoritative not-found,
/// `Err` is a transient failure the caller may retry.
#[async_trait]
pub trait CatalogLookup: Send + Sync {
    async fn lookup(&self, code: &str) -> Result<Option<CatalogProduct>, LookupError>;
}

// ============================================================================
// Open Food Facts Client
// ============================================================================

/// HTTP client for the Open Food Facts v2 product API
pub struct OpenFoodFactsClient {
    client: Client,
    base_url: String,
}

impl OpenFoodFactsClient {
    /// Create a client against the public catalog
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a client against a specific catalog endpoint
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let client = ClientBuilder::new()
            .user_agent(format!("{}/{}", build_info::NAME, build_info::VERSION))
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| Client::new());

        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Self { client, base_url }
    }
}

impl Default for OpenFoodFactsClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogLookup for OpenFoodFactsClient {
    async fn lookup(&self, code: &str) -> Result<Option<CatalogProduct>, LookupError> {
        let url = format!("{}/api/v2/product/{}.json", self.base_url, code);
        let response = self.client.get(&url).send().await?;

        // The catalog answers unknown codes with 404 or a status-0 body
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(LookupError::Status(response.status()));
        }

        let body: ProductResponse = response.json().await?;
        if body.status == Some(0) {
            return Ok(None);
        }
        let Some(payload) = body.product else {
            return Ok(None);
        };

        Ok(Some(payload.into_product()))
    }
}

// ============================================================================
// Response Payload
// ============================================================================

#[derive(Debug, Deserialize)]
struct ProductResponse {
    status: Option<i64>,
    product: Option<ProductPayload>,
}

#[derive(Debug, Deserialize)]
struct ProductPayload {
    product_name: Option<String>,
    #[serde(default)]
    nutriments: Nutriments,
    nutriscore_grade: Option<String>,
    categories: Option<String>,
    quantity: Option<String>,
}

/// Per-100 g nutriment fields; absent values default to 0
#[derive(Debug, Default, Deserialize)]
struct Nutriments {
    #[serde(rename = "energy-kcal_100g", default)]
    energy_kcal: f64,
    #[serde(rename = "fat_100g", default)]
    fat: f64,
    #[serde(rename = "saturated-fat_100g", default)]
    saturated_fat: f64,
    #[serde(rename = "carbohydrates_100g", default)]
    carbohydrates: f64,
    #[serde(rename = "sugars_100g", default)]
    sugars: f64,
    #[serde(rename = "proteins_100g", default)]
    proteins: f64,
    #[serde(rename = "salt_100g", default)]
    salt: f64,
}

impl ProductPayload {
    fn into_product(self) -> CatalogProduct {
        let name = match self.product_name {
            Some(name) if !name.is_empty() => name,
            _ => "unknown".to_string(),
        };

        CatalogProduct {
            name,
            per_100g: NutritionFacts {
                energy_kcal: self.nutriments.energy_kcal,
                fat: self.nutriments.fat,
                saturated_fat: self.nutriments.saturated_fat,
                carbohydrates: self.nutriments.carbohydrates,
                sugars: self.nutriments.sugars,
                proteins: self.nutriments.proteins,
                salt: self.nutriments.salt,
            },
            nutriscore: self
                .nutriscore_grade
                .as_deref()
                .and_then(NutriScore::from_grade),
            categories: self.categories,
            packaged_quantity: self.quantity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_conversion() {
        let json = r#"{
            "status": 1,
            "product": {
                "product_name": "Oat Flakes",
                "nutriments": {
                    "energy-kcal_100g": 370.0,
                    "fat_100g": 7.0,
                    "carbohydrates_100g": 58.7,
                    "proteins_100g": 13.5
                },
                "nutriscore_grade": "a",
                "categories": "Cereals",
                "quantity": "500g"
            }
        }"#;

        let response: ProductResponse = serde_json::from_str(json).unwrap();
        let product = response.product.unwrap().into_product();

        assert_eq!(product.name, "Oat Flakes");
        assert_eq!(product.per_100g.energy_kcal, 370.0);
        // Absent nutriment fields fall back to 0
        assert_eq!(product.per_100g.sugars, 0.0);
        assert_eq!(product.per_100g.salt, 0.0);
        assert_eq!(product.nutriscore, Some(NutriScore::A));
        assert_eq!(product.packaged_quantity.as_deref(), Some("500g"));
    }

    #[test]
    fn test_payload_defaults() {
        let json = r#"{"status": 1, "product": {}}"#;
        let response: ProductResponse = serde_json::from_str(json).unwrap();
        let product = response.product.unwrap().into_product();

        assert_eq!(product.name, "unknown");
        assert_eq!(product.per_100g, NutritionFacts::zero());
        assert_eq!(product.nutriscore, None);
        assert_eq!(product.packaged_quantity, None);
    }

    #[test]
    fn test_unknown_grade_maps_to_none() {
        let json = r#"{"status": 1, "product": {"nutriscore_grade": "not-applicable"}}"#;
        let response: ProductResponse = serde_json::from_str(json).unwrap();
        let product = response.product.unwrap().into_product();
        assert_eq!(product.nutriscore, None);
    }
}
