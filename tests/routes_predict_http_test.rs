// ABOUTME: HTTP integration tests for the prediction route
// ABOUTME: Covers scoring, input validation, and model failure responses
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SoGood NutriScore contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use helpers::axum_test::AxumTestRequest;
use nutriscore_server::errors::{AppError, AppResult};
use nutriscore_server::model::Regressor;
use nutriscore_server::server::NutriScoreServer;
use serde_json::{json, Value};
use std::sync::Arc;

struct BrokenModel;

impl Regressor for BrokenModel {
    fn predict(&self, _features: &[f64]) -> AppResult<f64> {
        Err(AppError::prediction("expected 21 features, got 20"))
    }

    fn n_features(&self) -> usize {
        21
    }

    fn kind(&self) -> &'static str {
        "broken"
    }
}

#[tokio::test]
async fn test_predict_soda() {
    let app = common::create_test_router(false).await;

    let response = AxumTestRequest::post("/predict/nutriscore")
        .json(&common::soda())
        .send(app)
        .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body["status"], "success");
    assert!((body["nutriscore"].as_f64().unwrap() - 14.2).abs() < 1e-9);
}

#[tokio::test]
async fn test_predict_without_category_or_brand() {
    let app = common::create_test_router(false).await;

    let response = AxumTestRequest::post("/predict/nutriscore")
        .json(&json!({
            "name": "Plain yogurt",
            "energy_100g": 100.0,
            "fat_100g": 1.0,
            "saturated_fat_100g": 0.5,
            "sugars_100g": 4.0,
            "salt_100g": 0.1,
            "fiber_100g": 0.0,
            "proteins_100g": 2.0,
            "fruits_vegetables_nuts_100g": 10.0
        }))
        .send(app)
        .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    let expected = common::expected_score(4.0, 0.0);
    assert!((body["nutriscore"].as_f64().unwrap() - expected).abs() < 1e-9);
}

#[tokio::test]
async fn test_predict_is_available_with_a_store_too() {
    let app = common::create_test_router(true).await;

    let response = AxumTestRequest::post("/predict/nutriscore")
        .json(&common::soda())
        .send(app)
        .await;

    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_predict_rejects_negative_quantity() {
    let app = common::create_test_router(false).await;
    let mut input = common::soda();
    input.sugars_100g = -3.0;

    let response = AxumTestRequest::post("/predict/nutriscore")
        .json(&input)
        .send(app)
        .await;

    assert_eq!(response.status(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "VALUE_OUT_OF_RANGE");
    assert_eq!(body["error"]["details"]["field"], "sugars_100g");
}

#[tokio::test]
async fn test_predict_rejects_blank_name() {
    let app = common::create_test_router(false).await;
    let mut input = common::soda();
    input.name = "   ".into();

    let response = AxumTestRequest::post("/predict/nutriscore")
        .json(&input)
        .send(app)
        .await;

    assert_eq!(response.status(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "MISSING_REQUIRED_FIELD");
}

#[tokio::test]
async fn test_predict_rejects_malformed_body() {
    let app = common::create_test_router(false).await;

    let response = AxumTestRequest::post("/predict/nutriscore")
        .raw_json(r#"{"name": "Cola", "energy_100g": "lots"}"#)
        .send(app)
        .await;

    assert!((400..500).contains(&response.status()));
}

#[tokio::test]
async fn test_model_failure_is_a_500_with_detail() {
    let resources = common::create_test_resources_with(Arc::new(BrokenModel), false)
        .await
        .unwrap();
    let app = NutriScoreServer::new(resources).router();

    let response = AxumTestRequest::post("/predict/nutriscore")
        .json(&common::soda())
        .send(app)
        .await;

    assert_eq!(response.status(), 500);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "PREDICTION_FAILED");
    assert_eq!(
        body["error"]["message"],
        "Prediction failed: expected 21 features, got 20"
    );
}
