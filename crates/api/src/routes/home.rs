use axum::routing::get;
use axum::Router;

use crate::handlers::home;
use crate::state::AppState;

/// Mount the welcome page (root level, NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home::welcome))
        .route("/home", get(home::welcome))
}
