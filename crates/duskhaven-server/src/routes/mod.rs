//! HTTP routes for operators.

pub mod health;
pub mod world;

use axum::Router;

use crate::state::AppState;

/// The full HTTP router, without middleware layers.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(health::router())
        .nest("/api/v1/world", world::router())
        .with_state(state)
}
