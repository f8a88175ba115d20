// ABOUTME: Prediction route handler for scoring products without storing them
// ABOUTME: Runs the feature pipeline and model, returning the NutriScore
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SoGood NutriScore contributors

use crate::errors::AppError;
use crate::resources::ServerResources;
use axum::{extract::State, routing::post, Json, Router};
use nutriscore_core::models::{PredictionResponse, ProductInput};
use std::sync::Arc;

/// Prediction routes implementation
pub struct PredictRoutes;

impl PredictRoutes {
    /// Create the prediction routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/predict/nutriscore", post(Self::handle_predict))
            .with_state(resources)
    }

    /// Handle POST /predict/nutriscore - Score a product
    async fn handle_predict(
        State(resources): State<Arc<ServerResources>>,
        Json(input): Json<ProductInput>,
    ) -> Result<Json<PredictionResponse>, AppError> {
        let nutriscore = resources.prediction.predict(&input)?;
        Ok(Json(PredictionResponse::success(nutriscore)))
    }
}
