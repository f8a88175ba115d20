// ABOUTME: Application error types re-exported from the core crate
// ABOUTME: Keeps `crate::errors` as the single import path inside the server
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SoGood NutriScore contributors

//! # Unified Error Handling System
//!
//! Error codes, the `AppError` type and the JSON error envelope live in
//! `nutriscore-core` so the pure feature pipeline can use them too. The
//! server enables the `http-response` and `database-errors` features so
//! `AppError` converts from `sqlx::Error` and renders as an axum response.

pub use nutriscore_core::errors::*;
