// ABOUTME: Static category-to-encoding lookup used by the NutriScore model
// ABOUTME: Exact-match table of target and frequency encodings with a neutral default
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SoGood NutriScore contributors

use serde::{Deserialize, Serialize};

/// Target and frequency encodings for a category label
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryEncoding {
    /// Mean outcome for the category in the training set
    pub target_encoding: f64,
    /// Occurrence rate of the category in the training set
    pub frequency: f64,
}

impl CategoryEncoding {
    /// Encoding used for absent or unknown categories
    pub const DEFAULT: Self = Self::new(2.5, 0.10);

    const fn new(target_encoding: f64, frequency: f64) -> Self {
        Self {
            target_encoding,
            frequency,
        }
    }

    /// Look up the encodings for a category label
    ///
    /// Matching is exact and case-sensitive. Unknown labels silently fall
    /// back to [`CategoryEncoding::DEFAULT`].
    #[must_use]
    pub fn for_category(category: Option<&str>) -> Self {
        category
            .and_then(|label| {
                KNOWN_CATEGORIES
                    .iter()
                    .find(|(known, _)| *known == label)
                    .map(|(_, encoding)| *encoding)
            })
            .unwrap_or(Self::DEFAULT)
    }
}

/// Precomputed encodings, one entry per category seen in training
pub const KNOWN_CATEGORIES: [(&str, CategoryEncoding); 6] = [
    ("Boissons", CategoryEncoding::new(2.5, 0.15)),
    ("Snacks", CategoryEncoding::new(4.2, 0.12)),
    ("Légumes", CategoryEncoding::new(1.2, 0.08)),
    ("Fruits", CategoryEncoding::new(1.0, 0.06)),
    ("Produits laitiers", CategoryEncoding::new(2.8, 0.10)),
    ("Céréales", CategoryEncoding::new(3.0, 0.09)),
];
