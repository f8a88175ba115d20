// ABOUTME: Request tracing spans for structured HTTP logging
// ABOUTME: Builds the tower-http trace layer with the request ID recorded on every span
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SoGood NutriScore contributors

use super::RequestId;
use axum::extract::Request;
use std::time::Duration;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::TraceLayer;
use tracing::Span;

/// Create a tracing span for HTTP requests
pub fn create_request_span(method: &str, path: &str, request_id: &str) -> Span {
    tracing::info_span!(
        "http_request",
        method = %method,
        path = %path,
        request_id = %request_id,
        status_code = tracing::field::Empty,
        duration_ms = tracing::field::Empty,
    )
}

fn span_for_request(request: &Request) -> Span {
    let request_id = request
        .extensions()
        .get::<RequestId>()
        .map_or("-", RequestId::as_str);
    create_request_span(request.method().as_str(), request.uri().path(), request_id)
}

fn record_response(response: &axum::response::Response, latency: Duration, span: &Span) {
    span.record("status_code", response.status().as_u16());
    span.record(
        "duration_ms",
        u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
    );
    tracing::info!("Request completed");
}

/// Trace layer that opens one span per request and logs completion
#[must_use]
pub fn http_trace_layer() -> TraceLayer<
    SharedClassifier<ServerErrorsAsFailures>,
    fn(&Request) -> Span,
    tower_http::trace::DefaultOnRequest,
    fn(&axum::response::Response, Duration, &Span),
> {
    TraceLayer::new_for_http()
        .make_span_with(span_for_request as fn(&Request) -> Span)
        .on_response(record_response as fn(&axum::response::Response, Duration, &Span))
}
