// ABOUTME: HTTP server assembly and lifecycle for the NutriScore API
// ABOUTME: Merges domain routers, applies middleware, and serves until shutdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SoGood NutriScore contributors

use crate::middleware::{http_trace_layer, request_id_middleware, setup_cors};
use crate::resources::ServerResources;
use crate::routes::{HealthRoutes, PredictRoutes, ProductRoutes};
use anyhow::{Context, Result};
use axum::{middleware, Router};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// NutriScore HTTP server
pub struct NutriScoreServer {
    resources: Arc<ServerResources>,
}

impl NutriScoreServer {
    /// Create a server over shared resources
    #[must_use]
    pub fn new(resources: Arc<ServerResources>) -> Self {
        Self { resources }
    }

    /// Build the full router with middleware applied
    #[must_use]
    pub fn router(&self) -> Router {
        Router::new()
            .merge(HealthRoutes::routes(self.resources.clone()))
            .merge(PredictRoutes::routes(self.resources.clone()))
            .merge(ProductRoutes::routes(self.resources.clone()))
            .layer(http_trace_layer())
            .layer(middleware::from_fn(request_id_middleware))
            .layer(setup_cors(&self.resources.config))
    }

    /// Bind the configured address and serve until Ctrl+C
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be bound or the server fails.
    pub async fn run(self) -> Result<()> {
        let address = self.resources.config.bind_address();
        let listener = TcpListener::bind(&address)
            .await
            .with_context(|| format!("Failed to bind {address}"))?;

        info!("NutriScore API listening on http://{address}");
        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("HTTP server error")?;

        info!("NutriScore API stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl+C: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
