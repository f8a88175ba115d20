// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses bind address, model paths, optional database URL, and CORS origins
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SoGood NutriScore contributors

//! Environment-based configuration management for production deployment

use crate::constants::{defaults, env_vars};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use tracing::info;

/// Environment type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated test runs
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Type-safe product store location
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum DatabaseUrl {
    /// `SQLite` database with file path
    SQLite {
        /// Database file, created if missing
        path: PathBuf,
    },
    /// In-memory `SQLite` (for testing)
    Memory,
}

impl DatabaseUrl {
    /// Parse from string with validation
    ///
    /// # Errors
    ///
    /// Returns an error for an empty URL or a scheme the store does not support.
    pub fn parse_url(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            bail!("Database URL is empty");
        }

        if let Some(path_str) = s.strip_prefix("sqlite:") {
            let path_str = path_str.trim_start_matches("//");
            if path_str == ":memory:" {
                Ok(Self::Memory)
            } else {
                Ok(Self::SQLite {
                    path: PathBuf::from(path_str),
                })
            }
        } else if s.contains("://") {
            bail!("Unsupported database URL scheme: {s}");
        } else {
            // Fallback: treat as SQLite file path
            Ok(Self::SQLite {
                path: PathBuf::from(s),
            })
        }
    }

    /// Convert to connection string
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::Memory => "sqlite::memory:".to_owned(),
        }
    }
}

/// Load a `.env` file into the process environment
///
/// Call before logging is initialised so the file can set `RUST_LOG` and
/// `LOG_FORMAT`. Nothing is logged here; the caller reports the outcome once a
/// subscriber exists. Variables already set in the environment win.
///
/// # Errors
///
/// Returns the `dotenvy` error if no file is found or it cannot be parsed.
pub fn load_env_file(path: Option<&Path>) -> Result<PathBuf, dotenvy::Error> {
    match path {
        Some(path) => dotenvy::from_path(path).map(|()| path.to_path_buf()),
        None => dotenvy::dotenv(),
    }
}

/// Model artifact locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// JSON model artifact
    pub path: PathBuf,
    /// Optional metadata JSON surfaced by `/health`
    pub metadata_path: Option<PathBuf>,
}

/// CORS settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated list of origins, or `*`
    pub allowed_origins: String,
}

/// Server configuration, created once at startup and shared read-only
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// HTTP port
    pub http_port: u16,
    /// Deployment environment
    pub environment: Environment,
    /// Model artifact locations
    pub model: ModelConfig,
    /// Product store; `None` runs the service in prediction-only mode
    pub database: Option<DatabaseUrl>,
    /// CORS settings
    pub cors: CorsConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if any environment variable holds an invalid value
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source
    ///
    /// # Errors
    ///
    /// Returns an error if any variable holds an invalid value
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let http_port = match non_empty(env_vars::HTTP_PORT) {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("Invalid {} value: {raw}", env_vars::HTTP_PORT))?,
            None => defaults::HTTP_PORT,
        };

        let database = non_empty(env_vars::DATABASE_URL)
            .map(|raw| DatabaseUrl::parse_url(&raw))
            .transpose()
            .with_context(|| format!("Invalid {} value", env_vars::DATABASE_URL))?;

        Ok(Self {
            host: non_empty(env_vars::HOST).unwrap_or_else(|| defaults::HOST.to_owned()),
            http_port,
            environment: non_empty(env_vars::ENVIRONMENT)
                .map(|raw| Environment::from_str_or_default(&raw))
                .unwrap_or_default(),
            model: ModelConfig {
                path: non_empty(env_vars::MODEL_PATH)
                    .map_or_else(|| PathBuf::from(defaults::MODEL_PATH), PathBuf::from),
                metadata_path: non_empty(env_vars::MODEL_METADATA_PATH).map(PathBuf::from),
            },
            database,
            cors: CorsConfig {
                allowed_origins: non_empty(env_vars::CORS_ALLOWED_ORIGINS)
                    .unwrap_or_else(|| defaults::CORS_ALLOWED_ORIGINS.to_owned()),
            },
        })
    }

    /// Whether the product store is configured
    #[must_use]
    pub const fn persistence_enabled(&self) -> bool {
        self.database.is_some()
    }

    /// Socket address string for the listener
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.http_port)
    }

    /// Get a summary of the configuration for logging (without secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "NutriScore API Configuration:\n\
             - Bind Address: {}\n\
             - Environment: {}\n\
             - Model: {}\n\
             - Model Metadata: {}\n\
             - Persistence: {}\n\
             - CORS Origins: {}",
            self.bind_address(),
            self.environment,
            self.model.path.display(),
            self.model
                .metadata_path
                .as_ref()
                .map_or_else(|| "none".to_owned(), |p| p.display().to_string()),
            self.database
                .as_ref()
                .map_or_else(|| "disabled".to_owned(), DatabaseUrl::to_connection_string),
            self.cors.allowed_origins,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config.bind_address(), "0.0.0.0:8000");
        assert_eq!(config.model.path, PathBuf::from(defaults::MODEL_PATH));
        assert!(config.model.metadata_path.is_none());
        assert!(!config.persistence_enabled());
        assert_eq!(config.cors.allowed_origins, "*");
        assert_eq!(config.environment, Environment::Development);
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            ("HOST", "127.0.0.1"),
            ("HTTP_PORT", "9090"),
            ("MODEL_PATH", "/srv/models/model.json"),
            ("MODEL_METADATA_PATH", "/srv/models/meta.json"),
            ("DATABASE_URL", "sqlite:./data/products.db"),
            ("ENVIRONMENT", "production"),
        ]))
        .unwrap();

        assert_eq!(config.bind_address(), "127.0.0.1:9090");
        assert_eq!(
            config.model.metadata_path,
            Some(PathBuf::from("/srv/models/meta.json"))
        );
        assert_eq!(
            config.database,
            Some(DatabaseUrl::SQLite {
                path: PathBuf::from("./data/products.db")
            })
        );
        assert!(config.environment.is_production());
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let config =
            ServerConfig::from_lookup(lookup_from(&[("DATABASE_URL", "  "), ("HTTP_PORT", "")]))
                .unwrap();

        assert!(config.database.is_none());
        assert_eq!(config.http_port, defaults::HTTP_PORT);
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let error = ServerConfig::from_lookup(lookup_from(&[("HTTP_PORT", "eighty")])).unwrap_err();
        assert!(error.to_string().contains("HTTP_PORT"));
    }

    #[test]
    fn test_database_url_parsing() {
        assert_eq!(
            DatabaseUrl::parse_url("sqlite::memory:").unwrap(),
            DatabaseUrl::Memory
        );
        assert_eq!(
            DatabaseUrl::parse_url("sqlite:products.db").unwrap(),
            DatabaseUrl::SQLite {
                path: PathBuf::from("products.db")
            }
        );
        assert_eq!(
            DatabaseUrl::parse_url("data/products.db").unwrap(),
            DatabaseUrl::SQLite {
                path: PathBuf::from("data/products.db")
            }
        );
        assert!(DatabaseUrl::parse_url("mongodb://localhost:27017/nutrition").is_err());
        assert_eq!(
            DatabaseUrl::Memory.to_connection_string(),
            "sqlite::memory:"
        );
    }
}
