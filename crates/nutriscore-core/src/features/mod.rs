// ABOUTME: Secondary feature derivation from raw per-100g nutritional quantities
// ABOUTME: Pure arithmetic transforms whose weights are fixed by the trained model
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SoGood NutriScore contributors

//! Feature pipeline
//!
//! A prediction runs three pure steps before the model sees anything:
//!
//! 1. [`DerivedFeatures::derive`] computes six secondary features.
//! 2. [`CategoryEncoding::for_category`] looks up the category encodings.
//! 3. [`FeatureVector::assemble`] lays all 20 values out in model order.
//!
//! None of these steps hold state, so identical input always yields a
//! bit-identical vector.

/// Static category target/frequency encodings
pub mod category;

/// Fixed-order model input vector
pub mod vector;

pub use category::CategoryEncoding;
pub use vector::{FeatureVector, FEATURE_COUNT, FEATURE_NAMES};

use crate::models::ProductInput;
use serde::{Deserialize, Serialize};

/// Water and ash allowance subtracted when estimating carbohydrates
const WATER_ASH_ESTIMATE_G: f64 = 5.0;

/// Ratio denominators are floored at this value.
///
/// Below one gram the ratio stops being a true ratio; the model was trained
/// on exactly this approximation.
const RATIO_DENOMINATOR_FLOOR: f64 = 1.0;

/// Six features computed from a [`ProductInput`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedFeatures {
    /// Estimated carbohydrates, never negative
    pub carbohydrates_100g: f64,
    /// Energy per gram
    pub energy_density: f64,
    /// Sugars over floored carbohydrates
    pub sugar_carb_ratio: f64,
    /// Saturated fat over floored total fat
    pub sat_fat_total_ratio: f64,
    /// Weighted sum of favourable nutrients
    pub positive_nutrients: f64,
    /// Weighted sum of unfavourable nutrients
    pub negative_nutrients: f64,
}

impl DerivedFeatures {
    /// Compute the derived features for a product
    ///
    /// Never fails. Contrived inputs (infinite quantities) may produce
    /// non-finite values; the assembler reports those.
    #[must_use]
    pub fn derive(input: &ProductInput) -> Self {
        let carbohydrates_100g = (100.0
            - input.fat_100g
            - input.proteins_100g
            - input.fiber_100g
            - WATER_ASH_ESTIMATE_G)
            .max(0.0);

        Self {
            carbohydrates_100g,
            energy_density: input.energy_100g / 100.0,
            sugar_carb_ratio: input.sugars_100g / carbohydrates_100g.max(RATIO_DENOMINATOR_FLOOR),
            sat_fat_total_ratio: input.saturated_fat_100g
                / input.fat_100g.max(RATIO_DENOMINATOR_FLOOR),
            positive_nutrients: input.fiber_100g
                + input.proteins_100g
                + input.fruits_vegetables_nuts_100g / 10.0,
            negative_nutrients: input.energy_100g / 50.0
                + input.fat_100g * 2.0
                + input.sugars_100g
                + input.salt_100g * 100.0,
        }
    }
}
