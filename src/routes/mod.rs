// ABOUTME: Route module organization for the NutriScore API HTTP endpoints
// ABOUTME: Groups banner, health, prediction and product routes by domain
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SoGood NutriScore contributors

//! Route module for the NutriScore API
//!
//! Each domain module holds route definitions and thin handlers that
//! delegate to the prediction service and the product store.

/// Health check and system status routes
pub mod health;
/// Prediction-only routes
pub mod predict;
/// Stored product routes
pub mod products;

pub use health::HealthRoutes;
pub use predict::PredictRoutes;
pub use products::ProductRoutes;
