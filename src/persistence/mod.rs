// ABOUTME: Product store abstraction for persisting scored products
// ABOUTME: Injected as an optional capability; the SQLite backend lives in a submodule
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SoGood NutriScore contributors

//! # Persistence
//!
//! Storing products is optional. When `DATABASE_URL` is set the server
//! connects a [`ProductStore`] and the `/products` routes become available;
//! otherwise those routes answer `503 RESOURCE_UNAVAILABLE` and prediction
//! keeps working.

/// `SQLite` backend
pub mod sqlite;

pub use sqlite::SqliteProductStore;

use crate::errors::AppResult;
use async_trait::async_trait;
use nutriscore_core::models::{ProductInput, StoredProduct};
use nutriscore_core::pagination::{Page, PageParams};

/// Write-once document store for scored products
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Store a product with its predicted score and return the stored record
    ///
    /// The store generates the identifier and the creation timestamp.
    async fn insert_product(
        &self,
        input: &ProductInput,
        nutriscore: f64,
    ) -> AppResult<StoredProduct>;

    /// Look up one product by identifier
    async fn get_product(&self, id: &str) -> AppResult<Option<StoredProduct>>;

    /// Products ordered by creation time, newest first
    async fn list_products(&self, params: PageParams) -> AppResult<Page<StoredProduct>>;

    /// Case-insensitive substring search on the product name
    async fn search_products(&self, name: &str, limit: u32) -> AppResult<Vec<StoredProduct>>;

    /// Products whose score lies in `[min, max]`, lowest score first
    async fn products_in_nutriscore_range(
        &self,
        min: f64,
        max: f64,
        params: PageParams,
    ) -> AppResult<Page<StoredProduct>>;

    /// Connectivity probe
    async fn ping(&self) -> AppResult<()>;

    /// Backend name for logs
    fn backend_name(&self) -> &'static str;
}
