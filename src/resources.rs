// ABOUTME: Shared, read-only server context built once at startup
// ABOUTME: Holds configuration, the prediction service, model metadata and the optional product store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SoGood NutriScore contributors

use crate::config::ServerConfig;
use crate::model::Regressor;
use crate::persistence::ProductStore;
use crate::prediction::PredictionService;
use std::sync::Arc;

/// Everything a request handler needs, shared as `Arc<ServerResources>`
pub struct ServerResources {
    /// Server configuration
    pub config: Arc<ServerConfig>,
    /// Feature pipeline plus model
    pub prediction: PredictionService,
    /// Model metadata surfaced verbatim by `/health`
    pub model_metadata: serde_json::Value,
    /// Product store, present only when persistence is configured
    pub product_store: Option<Arc<dyn ProductStore>>,
}

impl ServerResources {
    /// Assemble the context from its loaded parts
    #[must_use]
    pub fn new(
        config: ServerConfig,
        model: Arc<dyn Regressor>,
        model_metadata: serde_json::Value,
        product_store: Option<Arc<dyn ProductStore>>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            prediction: PredictionService::new(model),
            model_metadata,
            product_store,
        }
    }
}
