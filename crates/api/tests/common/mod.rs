#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use yieldcast_api::config::ServerConfig;
use yieldcast_api::router::build_app_router;
use yieldcast_api::state::AppState;
use yieldcast_core::model::LinearModel;
use yieldcast_core::{ModelRegistry, SchemaVariant, YieldService};

pub const TEST_ORIGIN: &str = "http://localhost:3000";

/// Crops model: intercept 0.5, Banana +10, Kharif +0.25, rainfall 0.001/mm,
/// fertilizer 0.01 per kg/ha.
pub const CROPS_MODEL: &str = r#"{
    "name": "crops_yield",
    "features": ["Crop", "Season", "State", "Annual_Rainfall",
                 "Fertilizer_Per_Hectare", "Pesticide_Per_Hectare"],
    "intercept": 0.5,
    "numeric": { "Annual_Rainfall": 0.001, "Fertilizer_Per_Hectare": 0.01 },
    "categorical": {
        "Crop": { "Banana": 10.0, "Rice": 1.0 },
        "Season": { "Kharif": 0.25 }
    }
}"#;

/// Coconut model: trained without a crop column.
pub const COCONUT_MODEL: &str = r#"{
    "name": "coconut_yield",
    "features": ["Season", "State", "Annual_Rainfall",
                 "Fertilizer_Per_Hectare", "Pesticide_Per_Hectare"],
    "intercept": 5000.0,
    "numeric": { "Annual_Rainfall": 1.0 },
    "categorical": { "State": { "Kerala": 1500.0 } }
}"#;

/// Legacy single model with `Area` after `State`.
pub const LEGACY_MODEL: &str = r#"{
    "name": "yield_predictor",
    "features": ["Crop", "Season", "State", "Area", "Annual_Rainfall",
                 "Fertilizer_Per_Hectare", "Pesticide_Per_Hectare"],
    "intercept": 1.0,
    "numeric": { "Area": 0.123456789 }
}"#;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config(variant: SchemaVariant) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 5000,
        debug: true,
        cors_origins: vec![TEST_ORIGIN.to_string()],
        model_dir: PathBuf::from("models"),
        schema_variant: variant,
        request_timeout_secs: 30,
    }
}

pub fn current_service() -> YieldService {
    let registry = ModelRegistry::Current {
        crops: Arc::new(LinearModel::from_json(CROPS_MODEL).unwrap()),
        coconut: Arc::new(LinearModel::from_json(COCONUT_MODEL).unwrap()),
    };
    YieldService::new(SchemaVariant::Current, Some(registry)).unwrap()
}

pub fn legacy_service() -> YieldService {
    let registry = ModelRegistry::Legacy {
        model: Arc::new(LinearModel::from_json(LEGACY_MODEL).unwrap()),
    };
    YieldService::new(SchemaVariant::Legacy, Some(registry)).unwrap()
}

/// Build the full application router, exercising the production middleware
/// stack (CORS, request ID, timeout, tracing, panic recovery).
pub fn build_test_app(service: YieldService) -> Router {
    let config = test_config(service.variant());
    build_app_router(AppState::new(config, service))
}

/// App serving the current schema with both models loaded.
pub fn current_app() -> Router {
    build_test_app(current_service())
}

/// App whose models failed to load.
pub fn unloaded_app() -> Router {
    build_test_app(YieldService::unavailable(SchemaVariant::Current))
}

pub async fn send(app: Router, method: Method, uri: &str, body: Body) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body)
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, Body::empty()).await
}

pub async fn post_json(app: Router, uri: &str, json: serde_json::Value) -> Response {
    send(app, Method::POST, uri, Body::from(json.to_string())).await
}

pub async fn post_raw(app: Router, uri: &str, body: &'static str) -> Response {
    send(app, Method::POST, uri, Body::from(body)).await
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
