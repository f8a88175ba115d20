// ABOUTME: Product data model for raw inputs, stored documents, and API responses
// ABOUTME: Includes input validation for nutritional quantities per 100g
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SoGood NutriScore contributors

//! Product models
//!
//! [`ProductInput`] is the raw request body accepted by both prediction
//! endpoints. [`StoredProduct`] is the document written by the persistence
//! adapter; it nests the nutritional quantities in [`NutritionalValues`].

use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Raw product attributes, all quantities per 100g
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductInput {
    /// Product display name
    pub name: String,
    /// Energy in kcal
    pub energy_100g: f64,
    /// Total fat in grams
    pub fat_100g: f64,
    /// Saturated fat in grams
    pub saturated_fat_100g: f64,
    /// Sugars in grams
    pub sugars_100g: f64,
    /// Salt in grams
    pub salt_100g: f64,
    /// Fiber in grams
    pub fiber_100g: f64,
    /// Proteins in grams
    pub proteins_100g: f64,
    /// Estimated fruits, vegetables and nuts content
    pub fruits_vegetables_nuts_100g: f64,
    /// Category label used for the target/frequency encodings
    #[serde(default)]
    pub category: Option<String>,
    /// Brand name
    #[serde(default)]
    pub brand: Option<String>,
}

impl ProductInput {
    /// Nutritional quantities as the nested record persisted with the product
    #[must_use]
    pub const fn nutritional_values(&self) -> NutritionalValues {
        NutritionalValues {
            energy_100g: self.energy_100g,
            fat_100g: self.fat_100g,
            saturated_fat_100g: self.saturated_fat_100g,
            sugars_100g: self.sugars_100g,
            salt_100g: self.salt_100g,
            fiber_100g: self.fiber_100g,
            proteins_100g: self.proteins_100g,
            fruits_vegetables_nuts_100g: self.fruits_vegetables_nuts_100g,
        }
    }

    /// Reject inputs the feature pipeline cannot meaningfully score
    ///
    /// # Errors
    ///
    /// Returns `MISSING_REQUIRED_FIELD` for a blank name and
    /// `VALUE_OUT_OF_RANGE` for a negative or non-finite quantity.
    pub fn validate(&self) -> AppResult<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::missing_field("name"));
        }

        for (field, value) in self.nutritional_values().fields() {
            if !value.is_finite() {
                return Err(AppError::out_of_range(
                    field,
                    format!("{field} must be a finite number"),
                ));
            }
            if value < 0.0 {
                return Err(AppError::out_of_range(
                    field,
                    format!("{field} must not be negative, got {value}"),
                ));
            }
        }

        Ok(())
    }
}

/// Nested nutritional record stored alongside a product
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NutritionalValues {
    /// Energy in kcal
    pub energy_100g: f64,
    /// Total fat in grams
    pub fat_100g: f64,
    /// Saturated fat in grams
    pub saturated_fat_100g: f64,
    /// Sugars in grams
    pub sugars_100g: f64,
    /// Salt in grams
    pub salt_100g: f64,
    /// Fiber in grams
    pub fiber_100g: f64,
    /// Proteins in grams
    pub proteins_100g: f64,
    /// Estimated fruits, vegetables and nuts content
    pub fruits_vegetables_nuts_100g: f64,
}

impl NutritionalValues {
    /// Field name and value pairs, in declaration order
    #[must_use]
    pub const fn fields(&self) -> [(&'static str, f64); 8] {
        [
            ("energy_100g", self.energy_100g),
            ("fat_100g", self.fat_100g),
            ("saturated_fat_100g", self.saturated_fat_100g),
            ("sugars_100g", self.sugars_100g),
            ("salt_100g", self.salt_100g),
            ("fiber_100g", self.fiber_100g),
            ("proteins_100g", self.proteins_100g),
            ("fruits_vegetables_nuts_100g", self.fruits_vegetables_nuts_100g),
        ]
    }
}

/// Product document as written to the product store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredProduct {
    /// Server-generated identifier
    pub id: String,
    /// Product display name
    pub name: String,
    /// Predicted `NutriScore`
    pub nutriscore: f64,
    /// Nutritional quantities submitted with the prediction request
    pub nutritional_values: NutritionalValues,
    /// Category label as submitted
    pub category: Option<String>,
    /// Brand as submitted
    pub brand: Option<String>,
    /// Insert time, RFC 3339 UTC
    pub created_at: String,
}

/// Response body of `POST /products/nutriscore`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductResponse {
    /// Server-generated identifier
    pub id: String,
    /// Product display name
    pub name: String,
    /// Predicted `NutriScore`
    pub nutriscore: f64,
    /// Insert time, RFC 3339 UTC
    pub created_at: String,
    /// Category label as submitted
    pub category: Option<String>,
    /// Brand as submitted
    pub brand: Option<String>,
}

impl From<StoredProduct> for ProductResponse {
    fn from(product: StoredProduct) -> Self {
        Self {
            id: product.id,
            name: product.name,
            nutriscore: product.nutriscore,
            created_at: product.created_at,
            category: product.category,
            brand: product.brand,
        }
    }
}

/// Response body of `POST /predict/nutriscore`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    /// Predicted `NutriScore`
    pub nutriscore: f64,
    /// Always `"success"`; failures use the error envelope instead
    pub status: String,
}

impl PredictionResponse {
    /// Successful prediction
    #[must_use]
    pub fn success(nutriscore: f64) -> Self {
        Self {
            nutriscore,
            status: "success".to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;

    fn coca_cola() -> ProductInput {
        serde_json::from_value(serde_json::json!({
            "name": "Coca Cola",
            "energy_100g": 180,
            "fat_100g": 0,
            "saturated_fat_100g": 0,
            "sugars_100g": 10.6,
            "salt_100g": 0,
            "fiber_100g": 0,
            "proteins_100g": 0,
            "fruits_vegetables_nuts_100g": 0,
            "category": "Boissons",
            "brand": "Coca Cola"
        }))
        .unwrap()
    }

    #[test]
    fn test_integer_quantities_deserialize_as_floats() {
        let product = coca_cola();
        assert!((product.energy_100g - 180.0).abs() < f64::EPSILON);
        assert_eq!(product.category.as_deref(), Some("Boissons"));
    }

    #[test]
    fn test_category_and_brand_are_optional() {
        let product: ProductInput = serde_json::from_value(serde_json::json!({
            "name": "Plain",
            "energy_100g": 1.0,
            "fat_100g": 0.0,
            "saturated_fat_100g": 0.0,
            "sugars_100g": 0.0,
            "salt_100g": 0.0,
            "fiber_100g": 0.0,
            "proteins_100g": 0.0,
            "fruits_vegetables_nuts_100g": 0.0
        }))
        .unwrap();

        assert!(product.category.is_none());
        assert!(product.brand.is_none());
        assert!(product.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_name() {
        let mut product = coca_cola();
        product.name = "   ".into();

        let error = product.validate().unwrap_err();
        assert_eq!(error.code, ErrorCode::MissingRequiredField);
    }

    #[test]
    fn test_validate_rejects_negative_quantity() {
        let mut product = coca_cola();
        product.salt_100g = -0.5;

        let error = product.validate().unwrap_err();
        assert_eq!(error.code, ErrorCode::ValueOutOfRange);
        assert_eq!(error.details["field"], "salt_100g");
    }

    #[test]
    fn test_validate_rejects_non_finite_quantity() {
        let mut product = coca_cola();
        product.fat_100g = f64::NAN;

        assert_eq!(
            product.validate().unwrap_err().code,
            ErrorCode::ValueOutOfRange
        );
    }

    #[test]
    fn test_product_response_drops_nutritional_values() {
        let product = coca_cola();
        let stored = StoredProduct {
            id: "abc".into(),
            name: product.name.clone(),
            nutriscore: 12.5,
            nutritional_values: product.nutritional_values(),
            category: product.category.clone(),
            brand: product.brand.clone(),
            created_at: "2025-07-03T08:55:29.000000Z".into(),
        };

        let json = serde_json::to_value(ProductResponse::from(stored)).unwrap();
        assert_eq!(json["id"], "abc");
        assert_eq!(json["brand"], "Coca Cola");
        assert!(json.get("nutritional_values").is_none());
    }
}
