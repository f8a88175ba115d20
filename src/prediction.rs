// ABOUTME: Prediction service running the feature pipeline and the loaded model
// ABOUTME: Validates input, assembles the 20-feature vector, and returns the NutriScore
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SoGood NutriScore contributors

use crate::errors::AppResult;
use crate::model::Regressor;
use nutriscore_core::features::FeatureVector;
use nutriscore_core::models::ProductInput;
use std::sync::Arc;
use tracing::{debug, info};

/// Runs deriver, encoder, assembler and model for one product
#[derive(Clone)]
pub struct PredictionService {
    model: Arc<dyn Regressor>,
}

impl PredictionService {
    /// Wrap a loaded model
    #[must_use]
    pub fn new(model: Arc<dyn Regressor>) -> Self {
        Self { model }
    }

    /// The shared model handle
    #[must_use]
    pub fn model(&self) -> &Arc<dyn Regressor> {
        &self.model
    }

    /// Predict the `NutriScore` of a product
    ///
    /// # Errors
    ///
    /// Returns a validation error for bad input, a feature preparation error
    /// if the assembled vector is not finite, or a prediction error from the
    /// model.
    pub fn predict(&self, input: &ProductInput) -> AppResult<f64> {
        input.validate()?;

        info!(
            product.name = %input.name,
            product.category = input.category.as_deref().unwrap_or("-"),
            energy_100g = input.energy_100g,
            sugars_100g = input.sugars_100g,
            "Scoring product"
        );

        let features = FeatureVector::from_product(input);
        features.ensure_finite()?;
        debug!(features = ?features.as_slice(), "Feature vector assembled");

        let nutriscore = self.model.predict(features.as_slice())?;
        info!(product.name = %input.name, nutriscore, "Prediction complete");

        Ok(nutriscore)
    }
}

impl std::fmt::Debug for PredictionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PredictionService")
            .field("model_kind", &self.model.kind())
            .field("n_features", &self.model.n_features())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{AppError, ErrorCode};
    use std::sync::Mutex;

    /// Records the last vector it was called with
    struct RecordingModel {
        seen: Mutex<Vec<f64>>,
    }

    impl Regressor for RecordingModel {
        fn predict(&self, features: &[f64]) -> AppResult<f64> {
            *self.seen.lock().unwrap() = features.to_vec();
            Ok(features.iter().sum())
        }

        fn n_features(&self) -> usize {
            20
        }

        fn kind(&self) -> &'static str {
            "recording"
        }
    }

    struct FailingModel;

    impl Regressor for FailingModel {
        fn predict(&self, _features: &[f64]) -> AppResult<f64> {
            Err(AppError::prediction("model exploded"))
        }

        fn n_features(&self) -> usize {
            20
        }

        fn kind(&self) -> &'static str {
            "failing"
        }
    }

    fn soda() -> ProductInput {
        ProductInput {
            name: "Cola".into(),
            energy_100g: 180.0,
            fat_100g: 0.0,
            saturated_fat_100g: 0.0,
            sugars_100g: 10.6,
            salt_100g: 0.0,
            fiber_100g: 0.0,
            proteins_100g: 0.0,
            fruits_vegetables_nuts_100g: 0.0,
            category: Some("Boissons".into()),
            brand: None,
        }
    }

    #[test]
    fn test_model_receives_assembled_vector() {
        let model = Arc::new(RecordingModel {
            seen: Mutex::new(Vec::new()),
        });
        let service = PredictionService::new(model.clone());

        service.predict(&soda()).unwrap();

        let seen = model.seen.lock().unwrap().clone();
        assert_eq!(seen, FeatureVector::from_product(&soda()).as_slice());
    }

    #[test]
    fn test_model_failure_is_propagated() {
        let service = PredictionService::new(Arc::new(FailingModel));
        let error = service.predict(&soda()).unwrap_err();

        assert_eq!(error.code, ErrorCode::PredictionFailed);
        assert_eq!(error.http_status(), 500);
        assert!(error.message.contains("model exploded"));
    }

    #[test]
    fn test_invalid_input_never_reaches_model() {
        let service = PredictionService::new(Arc::new(FailingModel));
        let mut input = soda();
        input.salt_100g = -1.0;

        let error = service.predict(&input).unwrap_err();
        assert_eq!(error.code, ErrorCode::ValueOutOfRange);
    }
}
