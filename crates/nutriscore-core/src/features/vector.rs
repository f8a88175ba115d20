// ABOUTME: Fixed-order 20-element feature vector expected by the NutriScore model
// ABOUTME: Assembles raw quantities, derived features, and category encodings in training column order
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SoGood NutriScore contributors

//! Model input vector
//!
//! The model was trained on exactly this column order. Positions are
//! load-bearing: reordering [`FEATURE_NAMES`] or [`FeatureVector::assemble`]
//! silently changes every prediction.

use super::{CategoryEncoding, DerivedFeatures};
use crate::errors::{AppError, AppResult};
use crate::models::ProductInput;

/// Number of model inputs
pub const FEATURE_COUNT: usize = 20;

/// Training column names, in vector order
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "additives_n",
    "energy-kcal_100g",
    "fat_100g",
    "saturated-fat_100g",
    "carbohydrates_100g",
    "sugars_100g",
    "fiber_100g",
    "fruits-vegetables-nuts-estimate-from-ingredients_100g",
    "fiber_missing",
    "categories_en_target_enc",
    "categories_en_freq",
    "food_groups_en_target_enc",
    "food_groups_en_freq",
    "main_category_en_target_enc",
    "main_category_en_freq",
    "energy_density",
    "sugar_carb_ratio",
    "sat_fat_total_ratio",
    "positive_nutrients",
    "negative_nutrients",
];

/// Additive count is not part of the request; the model always sees zero
const ADDITIVES_UNKNOWN: f64 = 0.0;

/// Ordered model input, built fresh for each prediction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    /// Lay out all inputs in training column order
    ///
    /// Food-group and main-category encodings repeat the category encoding;
    /// the model was trained with them as identical proxies.
    #[must_use]
    pub fn assemble(
        input: &ProductInput,
        derived: &DerivedFeatures,
        encoding: CategoryEncoding,
    ) -> Self {
        let fiber_missing = if input.fiber_100g == 0.0 { 1.0 } else { 0.0 };

        Self([
            ADDITIVES_UNKNOWN,
            input.energy_100g,
            input.fat_100g,
            input.saturated_fat_100g,
            derived.carbohydrates_100g,
            input.sugars_100g,
            input.fiber_100g,
            input.fruits_vegetables_nuts_100g,
            fiber_missing,
            encoding.target_encoding,
            encoding.frequency,
            encoding.target_encoding,
            encoding.frequency,
            encoding.target_encoding,
            encoding.frequency,
            derived.energy_density,
            derived.sugar_carb_ratio,
            derived.sat_fat_total_ratio,
            derived.positive_nutrients,
            derived.negative_nutrients,
        ])
    }

    /// Run the full pipeline: derive, encode, assemble
    #[must_use]
    pub fn from_product(input: &ProductInput) -> Self {
        let derived = DerivedFeatures::derive(input);
        let encoding = CategoryEncoding::for_category(input.category.as_deref());
        Self::assemble(input, &derived, encoding)
    }

    /// Values in model order
    #[must_use]
    pub const fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Value at a position, by training column name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<f64> {
        FEATURE_NAMES
            .iter()
            .position(|candidate| *candidate == name)
            .map(|index| self.0[index])
    }

    /// Column name and value pairs, in model order
    pub fn named(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURE_NAMES.iter().copied().zip(self.0.iter().copied())
    }

    /// Reject vectors the model cannot score
    ///
    /// # Errors
    ///
    /// Returns a feature preparation error naming the first non-finite column.
    pub fn ensure_finite(&self) -> AppResult<()> {
        match self.named().find(|(_, value)| !value.is_finite()) {
            Some((name, value)) => Err(AppError::feature_preparation(format!(
                "{name} is not a finite number ({value})"
            ))),
            None => Ok(()),
        }
    }
}

impl AsRef<[f64]> for FeatureVector {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}
