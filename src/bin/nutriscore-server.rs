// ABOUTME: NutriScore API server binary
// ABOUTME: Loads configuration and the model, connects the optional store, and serves HTTP
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SoGood NutriScore contributors

//! # NutriScore API Server Binary
//!
//! Any failure before the listener starts (bad configuration, missing or
//! corrupt model, unreachable store) aborts the process.

use anyhow::Result;
use clap::Parser;
use nutriscore_server::{
    config::{load_env_file, ServerConfig},
    logging,
    model::{load_metadata, load_model, Regressor},
    persistence::{ProductStore, SqliteProductStore},
    resources::ServerResources,
    server::NutriScoreServer,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Command-line overrides for the environment configuration
#[derive(Parser)]
#[command(name = "nutriscore-server")]
#[command(about = "NutriScore API - predicts the NutriScore of food products")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override model artifact path
    #[arg(long)]
    model_path: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let env_file = load_env_file(None);
    logging::init_from_env()?;
    match env_file {
        Ok(path) => info!("Loaded environment from {}", path.display()),
        Err(e) => warn!("No .env file found or failed to load: {e}"),
    }

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(model_path) = args.model_path {
        config.model.path = model_path;
    }
    info!("{}", config.summary());

    let model: Arc<dyn Regressor> = load_model(&config.model.path)?;
    let metadata = load_metadata(config.model.metadata_path.as_deref())?;

    let product_store: Option<Arc<dyn ProductStore>> = match &config.database {
        Some(url) => Some(Arc::new(SqliteProductStore::connect(url).await?)),
        None => {
            info!("DATABASE_URL not set; running in prediction-only mode");
            None
        }
    };

    let resources = Arc::new(ServerResources::new(config, model, metadata, product_store));
    display_available_endpoints(&resources);

    if let Err(e) = NutriScoreServer::new(resources).run().await {
        error!("Server error: {e:#}");
        return Err(e);
    }

    Ok(())
}

/// Display the available API endpoints
#[allow(clippy::cognitive_complexity)]
fn display_available_endpoints(resources: &ServerResources) {
    let address = resources.config.bind_address();

    info!("=== Available API Endpoints ===");
    info!("   Banner:            GET  http://{address}/");
    info!("   Health:            GET  http://{address}/health");
    info!("   Readiness:         GET  http://{address}/ready");
    info!("   Predict:           POST http://{address}/predict/nutriscore");
    if resources.product_store.is_some() {
        info!("   Score and store:   POST http://{address}/products/nutriscore");
        info!("   List products:     GET  http://{address}/products?page=1");
        info!("   Search products:   GET  http://{address}/products/search?name=");
        info!("   Exact score:       GET  http://{address}/products/nutriscore/{{score}}");
        info!("   Score range:       GET  http://{address}/products/nutriscore/range?min=&max=");
        info!("   Product by id:     GET  http://{address}/products/{{id}}");
    }
    info!("=== End of Endpoint List ===");
}
