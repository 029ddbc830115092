//! World status endpoint.

use axum::extract::State;
use axum::{Json, Router, routing::get};
use duskhaven_engine::application::world::WorldStatus;

use crate::state::AppState;

/// GET /api/v1/world/status
async fn status(State(state): State<AppState>) -> Json<WorldStatus> {
    Json(state.status.borrow().clone())
}

/// Returns the world router.
pub fn router() -> Router<AppState> {
    Router::new().route("/status", get(status))
}
