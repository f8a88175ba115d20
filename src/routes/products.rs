// ABOUTME: Route handlers for scoring and storing products and browsing stored products
// ABOUTME: Requires a configured product store; answers 503 when persistence is disabled
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SoGood NutriScore contributors

//! Product routes
//!
//! `POST /products/nutriscore` scores a product and stores it. The `GET`
//! routes browse what has been stored: newest first, by name, by exact
//! score, or by score range.

use crate::constants::defaults;
use crate::errors::AppError;
use crate::persistence::ProductStore;
use crate::resources::ServerResources;
use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use nutriscore_core::models::{ProductInput, ProductResponse, StoredProduct};
use nutriscore_core::pagination::{Page, PageParams};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Query parameters for GET /products
#[derive(Debug, Deserialize)]
pub struct ListProductsQuery {
    /// Page number, 1-based
    pub page: Option<u32>,
    /// Page size
    pub limit: Option<u32>,
}

/// Query parameters for GET /products/search
#[derive(Debug, Deserialize)]
pub struct SearchProductsQuery {
    /// Substring to look for in product names
    pub name: Option<String>,
}

/// Query parameters for GET /products/nutriscore/range
#[derive(Debug, Deserialize)]
pub struct RangeQuery {
    /// Lowest score, inclusive
    pub min: Option<String>,
    /// Highest score, inclusive
    pub max: Option<String>,
    /// Page number, 1-based
    pub page: Option<u32>,
    /// Page size
    pub limit: Option<u32>,
}

/// Query parameters for GET /products/nutriscore/:score
#[derive(Debug, Deserialize)]
pub struct ScoreQuery {
    /// Page number, 1-based
    pub page: Option<u32>,
    /// Page size
    pub limit: Option<u32>,
}

/// Response for GET /products/search
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Matching products
    pub products: Vec<StoredProduct>,
    /// Number of matches returned
    pub count: usize,
}

/// Product routes implementation
pub struct ProductRoutes;

impl ProductRoutes {
    /// Create the product routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/products", get(Self::handle_list))
            .route("/products/nutriscore", post(Self::handle_create))
            .route("/products/search", get(Self::handle_search))
            .route("/products/nutriscore/range", get(Self::handle_range))
            .route("/products/nutriscore/:score", get(Self::handle_exact_score))
            .route("/products/:id", get(Self::handle_get))
            .with_state(resources)
    }

    fn store(resources: &ServerResources) -> Result<&Arc<dyn ProductStore>, AppError> {
        resources.product_store.as_ref().ok_or_else(|| {
            AppError::unavailable("Product storage is not configured; set DATABASE_URL to enable it")
        })
    }

    fn parse_bound(name: &str, raw: Option<&str>) -> Result<f64, AppError> {
        let raw = raw
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| AppError::missing_field(name))?;
        let value: f64 = raw
            .parse()
            .map_err(|_| AppError::invalid_input(format!("{name} must be a number, got '{raw}'")))?;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(AppError::out_of_range(name, format!("{name} must be finite")))
        }
    }

    /// Handle POST /products/nutriscore - Score a product and store it
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        Json(input): Json<ProductInput>,
    ) -> Result<Json<ProductResponse>, AppError> {
        let store = Self::store(&resources)?;
        let nutriscore = resources.prediction.predict(&input)?;
        let product = store.insert_product(&input, nutriscore).await?;

        info!(product.id = %product.id, product.name = %product.name, nutriscore, "Product stored");
        Ok(Json(product.into()))
    }

    /// Handle GET /products - Newest products first
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        Query(query): Query<ListProductsQuery>,
    ) -> Result<Json<Page<StoredProduct>>, AppError> {
        let store = Self::store(&resources)?;
        let params = PageParams::new(query.page, query.limit);
        Ok(Json(store.list_products(params).await?))
    }

    /// Handle GET /products/search - Name search
    async fn handle_search(
        State(resources): State<Arc<ServerResources>>,
        Query(query): Query<SearchProductsQuery>,
    ) -> Result<Json<SearchResponse>, AppError> {
        let store = Self::store(&resources)?;
        let name = query
            .name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| AppError::missing_field("name"))?;

        let products = store.search_products(name, defaults::SEARCH_LIMIT).await?;
        Ok(Json(SearchResponse {
            count: products.len(),
            products,
        }))
    }

    /// Handle GET /products/nutriscore/range - Products within a score range
    async fn handle_range(
        State(resources): State<Arc<ServerResources>>,
        Query(query): Query<RangeQuery>,
    ) -> Result<Json<Page<StoredProduct>>, AppError> {
        let store = Self::store(&resources)?;
        let min = Self::parse_bound("min", query.min.as_deref())?;
        let max = Self::parse_bound("max", query.max.as_deref())?;
        if min > max {
            return Err(AppError::invalid_input(format!(
                "min ({min}) must not be greater than max ({max})"
            )));
        }

        let params = PageParams::new(query.page, query.limit);
        Ok(Json(
            store.products_in_nutriscore_range(min, max, params).await?,
        ))
    }

    /// Handle GET /products/nutriscore/:score - Products with exactly this score
    async fn handle_exact_score(
        State(resources): State<Arc<ServerResources>>,
        Path(score): Path<String>,
        Query(query): Query<ScoreQuery>,
    ) -> Result<Json<Page<StoredProduct>>, AppError> {
        let store = Self::store(&resources)?;
        let score = Self::parse_bound("score", Some(&score))?;

        let params = PageParams::new(query.page, query.limit);
        Ok(Json(
            store
                .products_in_nutriscore_range(score, score, params)
                .await?,
        ))
    }

    /// Handle GET /products/:id - One stored product
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
    ) -> Result<Json<StoredProduct>, AppError> {
        let store = Self::store(&resources)?;
        let product = store
            .get_product(&id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Product {id}")))?;
        Ok(Json(product))
    }
}
