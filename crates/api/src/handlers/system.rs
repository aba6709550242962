//! Handlers for `/api/v1/system`.

use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::response::Envelope;
use crate::state::AppState;

pub const MODEL_LOADED: &str = "loaded";
pub const MODEL_NOT_LOADED: &str = "not loaded";

pub const ENDPOINTS: &[&str] = &[
    "GET  / or /home                          - Welcome message",
    "GET  /api/v1/system/info                 - API information",
    "GET  /api/v1/system/health               - Health check",
    "POST /api/v1/crops/predict/yield         - Crop yield prediction",
    "POST /api/v1/crops/recommend             - Crop recommendation",
    "POST /api/v1/fertilizers/recommend       - Fertilizer recommendation",
    "POST /api/v1/pests/identify              - Pest identification",
];

/// Service metadata payload.
#[derive(Serialize)]
pub struct InfoResponse {
    pub name: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    pub status: &'static str,
    /// Schema variant this deployment serves (`legacy` or `current`).
    pub schema: &'static str,
    pub endpoints: &'static [&'static str],
    /// Serialized as an RFC 3339 UTC timestamp.
    pub timestamp: DateTime<Utc>,
}

/// Health check payload.
#[derive(Serialize)]
pub struct HealthResponse {
    pub server: &'static str,
    pub port: u16,
    pub debug: bool,
    /// `loaded` or `not loaded`.
    pub model_status: &'static str,
}

/// GET /api/v1/system/info
pub async fn info(State(state): State<AppState>) -> Json<Envelope<InfoResponse>> {
    Json(Envelope::ok(InfoResponse {
        name: "Crop Yield Prediction API",
        version: env!("CARGO_PKG_VERSION"),
        status: "running",
        schema: state.service.variant().as_str(),
        endpoints: ENDPOINTS,
        timestamp: Utc::now(),
    }))
}

/// GET /api/v1/system/health -- reports whether the models loaded at startup.
pub async fn health(State(state): State<AppState>) -> Json<Envelope<HealthResponse>> {
    let model_status = if state.service.is_loaded() {
        MODEL_LOADED
    } else {
        MODEL_NOT_LOADED
    };

    Json(Envelope::ok(HealthResponse {
        server: "axum",
        port: state.config.port,
        debug: state.config.debug,
        model_status,
    }))
}
