pub mod crops;
pub mod fertilizers;
pub mod home;
pub mod pests;
pub mod system;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /system/info                   service metadata
/// /system/health                 model status
///
/// /crops/predict/yield           yield prediction (POST, OPTIONS)
/// /crops/recommend               not implemented (POST)
///
/// /fertilizers/recommend         not implemented (POST)
///
/// /pests/identify                not implemented (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/system", system::router())
        .nest("/crops", crops::router())
        .nest("/fertilizers", fertilizers::router())
        .nest("/pests", pests::router())
}
