// ABOUTME: Page-based pagination for stored product listings
// ABOUTME: Provides page parameters with clamping and the pagination block returned to clients
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SoGood NutriScore contributors

use serde::{Deserialize, Serialize};

/// Items per page when the client does not ask for a size
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Upper bound on a client-requested page size
pub const MAX_PAGE_SIZE: u32 = 100;

/// Page selection, 1-based
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageParams {
    /// Page number, starting at 1
    pub page: u32,
    /// Items per page
    pub limit: u32,
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageParams {
    /// Build parameters from optional query values
    ///
    /// Missing or zero pages become 1; the limit is clamped to `1..=MAX_PAGE_SIZE`.
    #[must_use]
    pub fn new(page: Option<u32>, limit: Option<u32>) -> Self {
        Self {
            page: page.filter(|p| *p > 0).unwrap_or(1),
            limit: limit
                .unwrap_or(DEFAULT_PAGE_SIZE)
                .clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Number of items to skip
    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.page.saturating_sub(1) as u64 * self.limit as u64
    }
}

/// Pagination metadata returned with every page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    /// Requested page
    pub current_page: u32,
    /// Number of pages available
    pub total_pages: u64,
    /// Number of matching items across all pages
    pub total_products: u64,
    /// Page size
    pub products_per_page: u32,
    /// Whether a later page exists
    pub has_next: bool,
    /// Whether an earlier page exists
    pub has_previous: bool,
}

impl PageInfo {
    /// Compute pagination metadata for a total count
    #[must_use]
    pub fn new(params: PageParams, total: u64) -> Self {
        let total_pages = total.div_ceil(u64::from(params.limit));
        Self {
            current_page: params.page,
            total_pages,
            total_products: total,
            products_per_page: params.limit,
            has_next: u64::from(params.page) < total_pages,
            has_previous: params.page > 1,
        }
    }
}

/// One page of results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items on this page
    pub products: Vec<T>,
    /// Pagination metadata
    pub pagination: PageInfo,
}

impl<T> Page<T> {
    /// Assemble a page from its items and the total match count
    #[must_use]
    pub fn new(products: Vec<T>, params: PageParams, total: u64) -> Self {
        Self {
            products,
            pagination: PageInfo::new(params, total),
        }
    }
}
