// ABOUTME: HTTP middleware for request correlation, tracing spans, and CORS
// ABOUTME: Provides request ID propagation and span creation for structured logging
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SoGood NutriScore contributors

/// Cross-origin resource sharing for the web front end
pub mod cors;
/// Request ID propagation
pub mod request_id;
/// HTTP request spans
pub mod tracing;

pub use cors::setup_cors;
pub use request_id::{request_id_middleware, RequestId, REQUEST_ID_HEADER};
pub use tracing::{create_request_span, http_trace_layer};
