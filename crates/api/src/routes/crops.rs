//! Route definitions for the `/crops` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::{prediction, unimplemented};
use crate::state::AppState;

/// Routes mounted at `/crops`.
///
/// ```text
/// POST   /predict/yield   -> predict_yield
/// POST   /recommend       -> recommend_crop (501)
/// ```
///
/// OPTIONS preflights never reach these handlers; the route-level CORS
/// layer answers them with 204.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/predict/yield", post(prediction::predict_yield))
        .route("/recommend", post(unimplemented::recommend_crop))
}
