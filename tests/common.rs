// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides model artifacts, sample products, and server resources with or without a store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SoGood NutriScore contributors
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `nutriscore_server`

use anyhow::Result;
use async_trait::async_trait;
use nutriscore_server::{
    config::{DatabaseUrl, ServerConfig},
    errors::{AppError, AppResult},
    features::FEATURE_NAMES,
    model::{LoadedModel, ModelArtifact, Regressor},
    models::{ProductInput, StoredProduct},
    pagination::{Page, PageParams},
    persistence::{ProductStore, SqliteProductStore},
    resources::ServerResources,
    server::NutriScoreServer,
};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Once};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Linear model scoring `negative_nutrients - positive_nutrients`
pub fn linear_artifact_json() -> Value {
    let mut coefficients = vec![0.0; FEATURE_NAMES.len()];
    coefficients[18] = -1.0;
    coefficients[19] = 1.0;
    json!({
        "version": "test_model",
        "feature_names": FEATURE_NAMES,
        "model": {
            "type": "linear",
            "intercept": 0.0,
            "coefficients": coefficients
        }
    })
}

/// Write a JSON document into `dir` and return its path
pub fn write_json(dir: &Path, name: &str, value: &Value) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, serde_json::to_vec_pretty(value).unwrap()).unwrap();
    path
}

/// The test model, loaded from its artifact JSON
pub fn test_model() -> Arc<dyn Regressor> {
    let artifact: ModelArtifact = serde_json::from_value(linear_artifact_json()).unwrap();
    Arc::new(LoadedModel::from_artifact(artifact).unwrap())
}

/// Configuration with defaults and no store
pub fn test_config() -> ServerConfig {
    ServerConfig::from_lookup(|_| None).unwrap()
}

/// Resources over the given model, with an optional in-memory store
pub async fn create_test_resources_with(
    model: Arc<dyn Regressor>,
    with_store: bool,
) -> Result<Arc<ServerResources>> {
    init_test_logging();
    let mut config = test_config();
    let store: Option<Arc<dyn ProductStore>> = if with_store {
        config.database = Some(DatabaseUrl::Memory);
        Some(Arc::new(SqliteProductStore::connect(&DatabaseUrl::Memory).await?))
    } else {
        None
    };

    Ok(Arc::new(ServerResources::new(
        config,
        model,
        json!({ "model_type": "linear", "training_rows": 1000 }),
        store,
    )))
}

/// Resources over the test model
pub async fn create_test_resources(with_store: bool) -> Result<Arc<ServerResources>> {
    create_test_resources_with(test_model(), with_store).await
}

/// Full router with middleware
pub async fn create_test_router(with_store: bool) -> axum::Router {
    let resources = create_test_resources(with_store).await.unwrap();
    NutriScoreServer::new(resources).router()
}

/// Full router over the test model and the given store
pub fn create_test_router_with_store(store: Arc<dyn ProductStore>) -> axum::Router {
    init_test_logging();
    let mut config = test_config();
    config.database = Some(DatabaseUrl::Memory);
    let resources = Arc::new(ServerResources::new(
        config,
        test_model(),
        json!({}),
        Some(store),
    ));
    NutriScoreServer::new(resources).router()
}

/// Store whose backend has gone away: every operation fails
pub struct UnreachableStore;

impl UnreachableStore {
    fn error() -> AppError {
        AppError::database("connection refused")
    }
}

#[async_trait]
impl ProductStore for UnreachableStore {
    async fn insert_product(&self, _: &ProductInput, _: f64) -> AppResult<StoredProduct> {
        Err(Self::error())
    }

    async fn get_product(&self, _: &str) -> AppResult<Option<StoredProduct>> {
        Err(Self::error())
    }

    async fn list_products(&self, _: PageParams) -> AppResult<Page<StoredProduct>> {
        Err(Self::error())
    }

    async fn search_products(&self, _: &str, _: u32) -> AppResult<Vec<StoredProduct>> {
        Err(Self::error())
    }

    async fn products_in_nutriscore_range(
        &self,
        _: f64,
        _: f64,
        _: PageParams,
    ) -> AppResult<Page<StoredProduct>> {
        Err(Self::error())
    }

    async fn ping(&self) -> AppResult<()> {
        Err(Self::error())
    }

    fn backend_name(&self) -> &'static str {
        "unreachable"
    }
}

/// The soda example: negative nutrients 14.2, positive nutrients 0
pub fn soda() -> ProductInput {
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
        brand: Some("FizzCo".into()),
    }
}

/// A product with the given name and nutrient load
pub fn product(name: &str, sugars: f64, fiber: f64) -> ProductInput {
    ProductInput {
        name: name.into(),
        energy_100g: 100.0,
        fat_100g: 1.0,
        saturated_fat_100g: 0.5,
        sugars_100g: sugars,
        salt_100g: 0.1,
        fiber_100g: fiber,
        proteins_100g: 2.0,
        fruits_vegetables_nuts_100g: 10.0,
        category: None,
        brand: None,
    }
}

/// Score of [`product`] under the test model
pub fn expected_score(sugars: f64, fiber: f64) -> f64 {
    let negative = 100.0 / 50.0 + 1.0 * 2.0 + sugars + 0.1 * 100.0;
    let positive = fiber + 2.0 + 10.0 / 10.0;
    negative - positive
}
