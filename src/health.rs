// ABOUTME: Service health evaluation for the health and readiness endpoints
// ABOUTME: Reports model state, metadata, and product store connectivity
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SoGood NutriScore contributors

//! Health check evaluation

use crate::resources::ServerResources;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

/// Overall health status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// Model loaded and every configured dependency reachable
    Healthy,
    /// Serving, but a configured dependency is unreachable
    Degraded,
}

/// Body of `GET /health`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall service status
    pub status: HealthStatus,
    /// Whether a model is loaded
    pub model_loaded: bool,
    /// Number of inputs the model expects
    pub model_features_count: usize,
    /// Training column names declared by the model artifact
    pub model_features: Vec<String>,
    /// Always false: the model consumes raw features
    pub scaler_enabled: bool,
    /// Metadata document loaded at startup
    pub model_metadata: serde_json::Value,
    /// Store connectivity, present only when persistence is configured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_connected: Option<bool>,
}

/// Body of `GET /ready`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessResponse {
    /// Always `"ready"` once the server accepts connections
    pub status: String,
    /// Response timestamp, RFC 3339
    pub timestamp: String,
}

/// Evaluates health against the shared server context
pub struct HealthChecker {
    resources: Arc<ServerResources>,
}

impl HealthChecker {
    /// Create a new health checker
    #[must_use]
    pub fn new(resources: Arc<ServerResources>) -> Self {
        Self { resources }
    }

    /// Full health report, probing the product store when one is configured
    pub async fn check(&self) -> HealthResponse {
        let model = self.resources.prediction.model();

        let database_connected = match &self.resources.product_store {
            Some(store) => Some(match store.ping().await {
                Ok(()) => true,
                Err(e) => {
                    warn!(backend = store.backend_name(), "Health check: {e}");
                    false
                }
            }),
            None => None,
        };

        let model_loaded = model.n_features() > 0;
        let status = if model_loaded && database_connected != Some(false) {
            HealthStatus::Healthy
        } else {
            HealthStatus::Degraded
        };

        HealthResponse {
            status,
            model_loaded,
            model_features_count: model.n_features(),
            model_features: model.feature_names().to_vec(),
            scaler_enabled: false,
            model_metadata: self.resources.model_metadata.clone(),
            database_connected,
        }
    }

    /// Readiness probe; the model is loaded before the listener starts
    #[must_use]
    pub fn readiness() -> ReadinessResponse {
        ReadinessResponse {
            status: "ready".to_owned(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
