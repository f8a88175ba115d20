// ABOUTME: Linear regression model evaluated as intercept plus weighted feature sum
// ABOUTME: Validates coefficient count against the declared feature layout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SoGood NutriScore contributors

use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Ordinary least squares style linear model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearModel {
    /// Bias term
    pub intercept: f64,
    /// One weight per feature, in feature order
    pub coefficients: Vec<f64>,
}

impl LinearModel {
    /// Check the parameters against the expected input width
    ///
    /// # Errors
    ///
    /// Returns a model load error on a coefficient count mismatch or a
    /// non-finite parameter.
    pub fn validate(&self, n_features: usize) -> AppResult<()> {
        if self.coefficients.len() != n_features {
            return Err(AppError::model_load(format!(
                "linear model has {} coefficients for {n_features} features",
                self.coefficients.len()
            )));
        }
        if !self.intercept.is_finite() || self.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(AppError::model_load(
                "linear model contains non-finite parameters",
            ));
        }
        Ok(())
    }

    /// Evaluate the model; callers have already checked the input width
    #[must_use]
    pub fn score(&self, features: &[f64]) -> f64 {
        self.intercept
            + self
                .coefficients
                .iter()
                .zip(features)
                .map(|(weight, value)| weight * value)
                .sum::<f64>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score() {
        let model = LinearModel {
            intercept: 0.5,
            coefficients: vec![1.0, -2.0, 0.25],
        };
        assert!((model.score(&[2.0, 1.0, 4.0]) - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_validate_rejects_wrong_width() {
        let model = LinearModel {
            intercept: 0.0,
            coefficients: vec![1.0; 3],
        };
        assert!(model.validate(3).is_ok());
        assert!(model.validate(20).is_err());
    }

    #[test]
    fn test_validate_rejects_nan_weights() {
        let model = LinearModel {
            intercept: 0.0,
            coefficients: vec![1.0, f64::NAN],
        };
        assert!(model.validate(2).is_err());
    }
}
