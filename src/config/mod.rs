// ABOUTME: Configuration module for the NutriScore API server
// ABOUTME: Exposes the environment-driven server configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SoGood NutriScore contributors

//! Configuration module
//!
//! All settings come from environment variables (optionally via `.env`),
//! collected once at startup into an immutable [`environment::ServerConfig`].

/// Environment and server configuration
pub mod environment;

pub use environment::{load_env_file, DatabaseUrl, Environment, ServerConfig};
