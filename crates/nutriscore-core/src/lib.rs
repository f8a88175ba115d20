// ABOUTME: Core types and feature engineering for the NutriScore prediction service
// ABOUTME: Foundation crate with error handling, product models, pagination, and feature pipeline
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SoGood NutriScore contributors

#![deny(unsafe_code)]

//! # `NutriScore` Core
//!
//! Foundation crate for the `NutriScore` prediction service. Everything here is
//! free of I/O so the server crate, benches, and tests can share it.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **models**: Raw product input, stored product documents, and API responses
//! - **features**: Derived features, category encodings, and the model feature vector
//! - **pagination**: Page-based pagination for stored product listings

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Product data model shared by the HTTP layer and the persistence adapter
pub mod models;

/// Feature engineering pipeline feeding the regression model
pub mod features;

/// Page-based pagination for stored product queries
pub mod pagination;
