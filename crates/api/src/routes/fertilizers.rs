use axum::routing::post;
use axum::Router;

use crate::handlers::unimplemented;
use crate::state::AppState;

/// Routes mounted at `/fertilizers`.
pub fn router() -> Router<AppState> {
    Router::new().route("/recommend", post(unimplemented::recommend_fertilizer))
}
