// ABOUTME: Pre-trained regression model abstraction and artifact loading
// ABOUTME: Loads the versioned JSON model artifact and optional metadata at startup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SoGood NutriScore contributors

//! # Prediction model
//!
//! The service treats the trained model as a black box behind [`Regressor`].
//! At startup [`load_model`] reads a JSON artifact, validates it against the
//! feature layout the service produces, and returns a shared, read-only
//! handle. Any problem at this stage aborts startup.

/// Linear regression model
pub mod linear;

/// Decision tree ensembles (random forest, gradient boosting)
pub mod tree;

pub use linear::LinearModel;
pub use tree::{Aggregation, DecisionTree, TreeEnsemble, TreeNode};

use crate::errors::{AppError, AppResult};
use nutriscore_core::features::FEATURE_NAMES;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// A trained model that maps one feature vector to one score
pub trait Regressor: Send + Sync {
    /// Score a single feature vector
    ///
    /// # Errors
    ///
    /// Returns a prediction error on shape mismatch or a non-finite output.
    fn predict(&self, features: &[f64]) -> AppResult<f64>;

    /// Number of inputs the model expects
    fn n_features(&self) -> usize;

    /// Short model family name for health output
    fn kind(&self) -> &'static str;

    /// Artifact version, if the model declares one
    fn version(&self) -> Option<&str> {
        None
    }

    /// Training column names, in input order, if the model declares them
    fn feature_names(&self) -> &[String] {
        &[]
    }
}

/// Model family stored in the artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ModelSpec {
    /// Linear regression
    Linear(LinearModel),
    /// Tree ensemble
    TreeEnsemble(TreeEnsemble),
}

/// On-disk model artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    /// Artifact version, e.g. the training run identifier
    #[serde(default)]
    pub version: Option<String>,
    /// Training column names, in input order
    pub feature_names: Vec<String>,
    /// Model parameters
    pub model: ModelSpec,
}

/// Validated model ready to serve predictions
pub struct LoadedModel {
    version: Option<String>,
    feature_names: Vec<String>,
    spec: ModelSpec,
}

impl std::fmt::Debug for LoadedModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedModel")
            .field("version", &self.version)
            .field("kind", &self.kind())
            .field("n_features", &self.feature_names.len())
            .finish_non_exhaustive()
    }
}

impl LoadedModel {
    /// Validate an artifact and wrap it for serving
    ///
    /// # Errors
    ///
    /// Returns a model load error if the declared features differ from the
    /// service's feature layout or the parameters are inconsistent.
    pub fn from_artifact(artifact: ModelArtifact) -> AppResult<Self> {
        if artifact.feature_names.len() != FEATURE_NAMES.len() {
            return Err(AppError::model_load(format!(
                "model expects {} features, service produces {}",
                artifact.feature_names.len(),
                FEATURE_NAMES.len()
            )));
        }
        if let Some((index, (declared, produced))) = artifact
            .feature_names
            .iter()
            .zip(FEATURE_NAMES)
            .enumerate()
            .find(|(_, (declared, produced))| declared.as_str() != *produced)
        {
            return Err(AppError::model_load(format!(
                "feature {} is '{declared}' in the model but '{produced}' in the service",
                index + 1
            )));
        }

        let n_features = artifact.feature_names.len();
        match &artifact.model {
            ModelSpec::Linear(model) => model.validate(n_features)?,
            ModelSpec::TreeEnsemble(model) => model.validate(n_features)?,
        }

        Ok(Self {
            version: artifact.version,
            feature_names: artifact.feature_names,
            spec: artifact.model,
        })
    }
}

impl Regressor for LoadedModel {
    fn predict(&self, features: &[f64]) -> AppResult<f64> {
        if features.len() != self.feature_names.len() {
            return Err(AppError::prediction(format!(
                "expected {} features, got {}",
                self.feature_names.len(),
                features.len()
            )));
        }

        let score = match &self.spec {
            ModelSpec::Linear(model) => model.score(features),
            ModelSpec::TreeEnsemble(model) => model.score(features),
        };

        if score.is_finite() {
            Ok(score)
        } else {
            Err(AppError::prediction(format!(
                "model returned a non-finite score ({score})"
            )))
        }
    }

    fn n_features(&self) -> usize {
        self.feature_names.len()
    }

    fn kind(&self) -> &'static str {
        match self.spec {
            ModelSpec::Linear(_) => "linear",
            ModelSpec::TreeEnsemble(_) => "tree_ensemble",
        }
    }

    fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }
}

/// Load and validate the model artifact at `path`
///
/// # Errors
///
/// Returns a model load error if the file cannot be read, parsed, or validated.
pub fn load_model(path: &Path) -> AppResult<Arc<LoadedModel>> {
    info!("Loading model artifact from {}", path.display());

    let raw = std::fs::read_to_string(path).map_err(|e| {
        AppError::model_load(format!("cannot read {}: {e}", path.display())).with_source(e)
    })?;
    let artifact: ModelArtifact = serde_json::from_str(&raw).map_err(|e| {
        AppError::model_load(format!("cannot parse {}: {e}", path.display())).with_source(e)
    })?;

    let model = LoadedModel::from_artifact(artifact)?;
    info!(
        model.kind = model.kind(),
        model.version = model.version().unwrap_or("unversioned"),
        model.features = model.n_features(),
        "Model loaded"
    );

    Ok(Arc::new(model))
}

/// Load the optional metadata document surfaced by `/health`
///
/// No path means no metadata and yields an empty object. A configured path
/// that cannot be read or parsed is a startup failure.
///
/// # Errors
///
/// Returns a model load error if a configured file is missing or not JSON.
pub fn load_metadata(path: Option<&Path>) -> AppResult<serde_json::Value> {
    let Some(path) = path else {
        warn!("No model metadata configured; /health will report an empty object");
        return Ok(serde_json::Value::Object(serde_json::Map::new()));
    };

    let raw = std::fs::read_to_string(path).map_err(|e| {
        AppError::model_load(format!("cannot read metadata {}: {e}", path.display()))
            .with_source(e)
    })?;
    let metadata = serde_json::from_str(&raw).map_err(|e| {
        AppError::model_load(format!("cannot parse metadata {}: {e}", path.display()))
            .with_source(e)
    })?;

    info!("Model metadata loaded from {}", path.display());
    Ok(metadata)
}
