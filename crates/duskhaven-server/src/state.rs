//! Shared application state.

use duskhaven_engine::application::world::WorldStatus;
use tokio::sync::watch;

/// Application state shared across all request handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Latest world snapshot, published by the engine loop after each event.
    pub status: watch::Receiver<WorldStatus>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(status: watch::Receiver<WorldStatus>) -> Self {
        Self { status }
    }
}
