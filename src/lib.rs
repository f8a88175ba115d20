// ABOUTME: Main library entry point for the NutriScore prediction API
// ABOUTME: Wires configuration, model loading, persistence, and HTTP routes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SoGood NutriScore contributors

#![deny(unsafe_code)]

//! # NutriScore API
//!
//! An HTTP service that predicts the `NutriScore` of a food product from its
//! nutritional values per 100g.
//!
//! ## Architecture
//!
//! - **Feature pipeline** (`nutriscore-core`): derives secondary features,
//!   encodes the category and assembles the 20-value vector
//! - **Model**: a JSON model artifact loaded once at startup
//! - **Persistence**: an optional product store, enabled by `DATABASE_URL`
//! - **Routes**: axum handlers over a shared, read-only [`resources::ServerResources`]
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use nutriscore_server::config::ServerConfig;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("NutriScore API configured on {}", config.bind_address());
//!     Ok(())
//! }
//! ```

/// Environment configuration
pub mod config;

/// Service constants and environment variable names
pub mod constants;

/// Error types shared with the core crate
pub mod errors;

/// Health evaluation
pub mod health;

/// Structured logging setup
pub mod logging;

/// HTTP middleware
pub mod middleware;

/// Model artifact loading and evaluation
pub mod model;

/// Optional product persistence
pub mod persistence;

/// Prediction service
pub mod prediction;

/// Shared server context
pub mod resources;

/// HTTP routes
pub mod routes;

/// HTTP server assembly
pub mod server;

pub use nutriscore_core::{features, models, pagination};
