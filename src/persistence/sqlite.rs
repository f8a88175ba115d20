// ABOUTME: SQLite implementation of the product store
// ABOUTME: Stores each product as one row with its nutritional values as a JSON column
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SoGood NutriScore contributors

use super::ProductStore;
use crate::config::DatabaseUrl;
use crate::errors::{AppError, AppResult};
use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use nutriscore_core::models::{NutritionalValues, ProductInput, StoredProduct};
use nutriscore_core::pagination::{Page, PageParams};
use sqlx::sqlite::{SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};
use tracing::{debug, info};
use uuid::Uuid;

const PRODUCT_COLUMNS: &str =
    "id, name, nutriscore, nutritional_values, category, brand, created_at";

/// Product store backed by a `SQLite` database
#[derive(Clone)]
pub struct SqliteProductStore {
    pool: SqlitePool,
}

impl SqliteProductStore {
    /// Connect and create the schema if needed
    ///
    /// # Errors
    ///
    /// Returns a database error if the connection or the schema setup fails.
    pub async fn connect(url: &DatabaseUrl) -> AppResult<Self> {
        let pool = match url {
            // One connection so every query sees the same in-memory database
            DatabaseUrl::Memory => SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect(&url.to_connection_string())
                .await?,
            // Ensure SQLite creates the database file if it doesn't exist
            DatabaseUrl::SQLite { .. } => {
                SqlitePool::connect(&format!("{}?mode=rwc", url.to_connection_string())).await?
            }
        };

        let store = Self { pool };
        store.migrate().await?;
        info!("Product store ready at {}", url.to_connection_string());
        Ok(store)
    }

    async fn migrate(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS products (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                name_folded TEXT NOT NULL,
                nutriscore REAL NOT NULL,
                nutritional_values TEXT NOT NULL,
                category TEXT,
                brand TEXT,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create products table: {e}")))?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_products_created_at ON products(created_at)")
            .execute(&self.pool)
            .await?;
        sqlx::query("CREATE INDEX IF NOT EXISTS idx_products_nutriscore ON products(nutriscore)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn count(&self, filter: &str, bounds: Option<(f64, f64)>) -> AppResult<u64> {
        let sql = format!("SELECT COUNT(*) AS total FROM products {filter}");
        let mut query = sqlx::query(&sql);
        if let Some((min, max)) = bounds {
            query = query.bind(min).bind(max);
        }
        let row = query
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to count products: {e}")))?;
        let total: i64 = row.get("total");
        Ok(u64::try_from(total).unwrap_or(0))
    }
}

fn page_bounds(params: PageParams) -> (i64, i64) {
    (
        i64::from(params.limit),
        i64::try_from(params.offset()).unwrap_or(i64::MAX),
    )
}

fn row_to_product(row: &SqliteRow) -> AppResult<StoredProduct> {
    let values_json: String = row.get("nutritional_values");
    let nutritional_values: NutritionalValues = serde_json::from_str(&values_json)?;

    Ok(StoredProduct {
        id: row.get("id"),
        name: row.get("name"),
        nutriscore: row.get("nutriscore"),
        nutritional_values,
        category: row.get("category"),
        brand: row.get("brand"),
        created_at: row.get("created_at"),
    })
}

/// Lower-case form of a name for case-insensitive search
///
/// `SQLite`'s `lower()` only folds ASCII, so accented capitals are folded here.
fn fold_name(name: &str) -> String {
    name.to_lowercase()
}

fn rows_to_products(rows: &[SqliteRow]) -> AppResult<Vec<StoredProduct>> {
    rows.iter().map(row_to_product).collect()
}

#[async_trait]
impl ProductStore for SqliteProductStore {
    async fn insert_product(
        &self,
        input: &ProductInput,
        nutriscore: f64,
    ) -> AppResult<StoredProduct> {
        let product = StoredProduct {
            id: Uuid::new_v4().to_string(),
            name: input.name.clone(),
            nutriscore,
            nutritional_values: input.nutritional_values(),
            category: input.category.clone(),
            brand: input.brand.clone(),
            created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        };
        let values_json = serde_json::to_string(&product.nutritional_values)?;

        sqlx::query(
            r"
            INSERT INTO products (id, name, name_folded, nutriscore, nutritional_values, category, brand, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(fold_name(&product.name))
        .bind(product.nutriscore)
        .bind(&values_json)
        .bind(&product.category)
        .bind(&product.brand)
        .bind(&product.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to store product: {e}")))?;

        debug!(product.id = %product.id, "Product stored");
        Ok(product)
    }

    async fn get_product(&self, id: &str) -> AppResult<Option<StoredProduct>> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1");
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get product: {e}")))?;

        row.as_ref().map(row_to_product).transpose()
    }

    async fn list_products(&self, params: PageParams) -> AppResult<Page<StoredProduct>> {
        let total = self.count("", None).await?;
        let (limit, offset) = page_bounds(params);

        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products \
             ORDER BY created_at DESC, rowid DESC LIMIT $1 OFFSET $2"
        );
        let rows = sqlx::query(&sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list products: {e}")))?;

        Ok(Page::new(rows_to_products(&rows)?, params, total))
    }

    async fn search_products(&self, name: &str, limit: u32) -> AppResult<Vec<StoredProduct>> {
        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products \
             WHERE instr(name_folded, $1) > 0 \
             ORDER BY name ASC LIMIT $2"
        );
        let rows = sqlx::query(&sql)
            .bind(fold_name(name))
            .bind(i64::from(limit))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to search products: {e}")))?;

        rows_to_products(&rows)
    }

    async fn products_in_nutriscore_range(
        &self,
        min: f64,
        max: f64,
        params: PageParams,
    ) -> AppResult<Page<StoredProduct>> {
        let filter = "WHERE nutriscore >= $1 AND nutriscore <= $2";
        let total = self.count(filter, Some((min, max))).await?;
        let (limit, offset) = page_bounds(params);

        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products {filter} \
             ORDER BY nutriscore ASC, name ASC LIMIT $3 OFFSET $4"
        );
        let rows = sqlx::query(&sql)
            .bind(min)
            .bind(max)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to query products by score: {e}")))?;

        Ok(Page::new(rows_to_products(&rows)?, params, total))
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Product store unreachable: {e}")))?;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "sqlite"
    }
}
