// ABOUTME: Service-wide constants and environment variable names for the NutriScore API
// ABOUTME: Holds defaults for ports, model paths, and the root banner message
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SoGood NutriScore contributors

//! # Constants Module
//!
//! Hardcoded defaults and the names of the environment variables that
//! override them.

/// Service identity used in logs and health responses
pub mod service_names {
    /// Service name
    pub const NUTRISCORE_API: &str = "nutriscore-api";

    /// Message returned by `GET /`
    pub const BANNER: &str = "API NutriScore - SoGood est en ligne ! (Sans scaler pour de meilleures prédictions)";
}

/// Default values applied when the environment does not override them
pub mod defaults {
    /// Bind address
    pub const HOST: &str = "0.0.0.0";

    /// HTTP port
    pub const HTTP_PORT: u16 = 8000;

    /// Model artifact location
    pub const MODEL_PATH: &str = "models/nutriscore_model.json";

    /// CORS origins
    pub const CORS_ALLOWED_ORIGINS: &str = "*";

    /// Maximum number of results returned by a name search
    pub const SEARCH_LIMIT: u32 = 20;
}

/// Environment variable names
pub mod env_vars {
    /// Bind address
    pub const HOST: &str = "HOST";
    /// HTTP port
    pub const HTTP_PORT: &str = "HTTP_PORT";
    /// Model artifact location
    pub const MODEL_PATH: &str = "MODEL_PATH";
    /// Optional model metadata location
    pub const MODEL_METADATA_PATH: &str = "MODEL_METADATA_PATH";
    /// Enables persistence when set
    pub const DATABASE_URL: &str = "DATABASE_URL";
    /// Comma-separated CORS origins or `*`
    pub const CORS_ALLOWED_ORIGINS: &str = "CORS_ALLOWED_ORIGINS";
    /// Deployment environment
    pub const ENVIRONMENT: &str = "ENVIRONMENT";
}
