use axum::routing::post;
use axum::Router;

use crate::handlers::unimplemented;
use crate::state::AppState;

/// Routes mounted at `/pests`.
pub fn router() -> Router<AppState> {
    Router::new().route("/identify", post(unimplemented::identify_pest))
}
