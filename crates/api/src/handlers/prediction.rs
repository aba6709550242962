//! Handlers for `/api/v1/crops/predict/yield`.

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::State;
use axum::Json;
use serde_json::Value;
use yieldcast_core::{CoreError, PredictionResult};

use crate::error::{AppError, AppResult};
use crate::response::Envelope;
use crate::state::AppState;

/// POST /api/v1/crops/predict/yield
///
/// The body is read raw so that an absent or empty body reports missing
/// input instead of an extractor rejection. Model availability is checked
/// before the body is looked at, including a body that failed to buffer.
pub async fn predict_yield(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> AppResult<Json<Envelope<PredictionResult>>> {
    tracing::info!("Received request for yield prediction");

    if !state.service.is_loaded() {
        return Err(CoreError::ModelUnavailable.into());
    }

    let body = body?;
    let payload = parse_body(&body)?;
    tracing::debug!(input = ?payload, "Prediction input");

    let result = state.service.predict(payload.as_ref())?;
    Ok(Json(Envelope::ok(result)))
}

fn parse_body(body: &[u8]) -> Result<Option<Value>, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice(body)
        .map(Some)
        .map_err(|e| AppError::InvalidBody(e.to_string()))
}
