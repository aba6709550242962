//! Route definitions for the `/system` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::system;
use crate::state::AppState;

/// Routes mounted at `/system`.
///
/// ```text
/// GET    /info      -> info
/// GET    /health    -> health
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/info", get(system::info))
        .route("/health", get(system::health))
}
