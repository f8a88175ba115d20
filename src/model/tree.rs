// ABOUTME: Decision tree ensembles stored as flat node arrays
// ABOUTME: Covers random forests (mean aggregation) and boosted trees (sum plus base score)
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SoGood NutriScore contributors

use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// How per-tree outputs are combined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregation {
    /// Average of tree outputs (random forest)
    Mean,
    /// Sum of tree outputs (gradient boosting)
    Sum,
}

/// One node of a flattened tree
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TreeNode {
    /// Internal node; goes left when `x[feature] <= threshold`
    Split {
        /// Feature index
        feature: usize,
        /// Split threshold
        threshold: f64,
        /// Index of the left child
        left: usize,
        /// Index of the right child
        right: usize,
    },
    /// Terminal node
    Leaf {
        /// Output value
        value: f64,
    },
}

/// A single tree; node 0 is the root
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    /// Flattened nodes
    pub nodes: Vec<TreeNode>,
}

impl DecisionTree {
    fn validate(&self, n_features: usize) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err("tree has no nodes".to_owned());
        }

        for (index, node) in self.nodes.iter().enumerate() {
            match *node {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if feature >= n_features {
                        return Err(format!(
                            "node {index} splits on feature {feature}, only {n_features} exist"
                        ));
                    }
                    if !threshold.is_finite() {
                        return Err(format!("node {index} has a non-finite threshold"));
                    }
                    // Children must point forward, which also rules out cycles
                    for child in [left, right] {
                        if child <= index || child >= self.nodes.len() {
                            return Err(format!("node {index} has invalid child {child}"));
                        }
                    }
                }
                TreeNode::Leaf { value } => {
                    if !value.is_finite() {
                        return Err(format!("leaf {index} has a non-finite value"));
                    }
                }
            }
        }
        Ok(())
    }

    /// Walk from the root to a leaf
    #[must_use]
    pub fn evaluate(&self, features: &[f64]) -> f64 {
        let mut index = 0;
        loop {
            match self.nodes.get(index) {
                Some(TreeNode::Leaf { value }) => return *value,
                Some(TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    let value = features.get(*feature).copied().unwrap_or(f64::NAN);
                    index = if value <= *threshold { *left } else { *right };
                }
                // Unreachable for validated trees
                None => return f64::NAN,
            }
        }
    }
}

/// Ensemble of decision trees
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeEnsemble {
    /// Added to the aggregated output
    #[serde(default)]
    pub base_score: f64,
    /// Combination rule
    pub aggregation: Aggregation,
    /// Member trees
    pub trees: Vec<DecisionTree>,
}

impl TreeEnsemble {
    /// Check tree structure against the expected input width
    ///
    /// # Errors
    ///
    /// Returns a model load error for an empty ensemble, an out-of-range
    /// feature index, a child index that does not point forward, or a
    /// non-finite parameter.
    pub fn validate(&self, n_features: usize) -> AppResult<()> {
        if self.trees.is_empty() {
            return Err(AppError::model_load("tree ensemble has no trees"));
        }
        if !self.base_score.is_finite() {
            return Err(AppError::model_load("tree ensemble has a non-finite base score"));
        }
        for (index, tree) in self.trees.iter().enumerate() {
            tree.validate(n_features)
                .map_err(|detail| AppError::model_load(format!("tree {index}: {detail}")))?;
        }
        Ok(())
    }

    /// Evaluate every tree and combine the outputs
    #[must_use]
    pub fn score(&self, features: &[f64]) -> f64 {
        let total: f64 = self.trees.iter().map(|tree| tree.evaluate(features)).sum();
        let combined = match self.aggregation {
            Aggregation::Mean => total / self.trees.len() as f64,
            Aggregation::Sum => total,
        };
        self.base_score + combined
    }
}
