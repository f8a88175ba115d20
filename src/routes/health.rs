// ABOUTME: Health check route handlers for service monitoring and status endpoints
// ABOUTME: Provides the banner, health, and readiness endpoints
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SoGood NutriScore contributors

//! Health check routes for service monitoring

use crate::constants::service_names;
use crate::health::{HealthChecker, HealthResponse, ReadinessResponse};
use crate::resources::ServerResources;
use axum::{extract::State, routing::get, Json, Router};
use serde_json::json;
use std::sync::Arc;

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create the banner, health and readiness routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/", get(Self::handle_root))
            .route("/health", get(Self::handle_health))
            .route("/ready", get(Self::handle_ready))
            .with_state(resources)
    }

    /// Handle GET / - Service banner
    async fn handle_root() -> Json<serde_json::Value> {
        Json(json!({ "message": service_names::BANNER }))
    }

    /// Handle GET /health - Model and store status
    async fn handle_health(
        State(resources): State<Arc<ServerResources>>,
    ) -> Json<HealthResponse> {
        Json(HealthChecker::new(resources).check().await)
    }

    /// Handle GET /ready - Readiness probe
    async fn handle_ready() -> Json<ReadinessResponse> {
        Json(HealthChecker::readiness())
    }
}
