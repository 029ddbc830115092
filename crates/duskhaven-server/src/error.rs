//! Duskhaven server error types.

use duskhaven_content::application::pack::ContentError;
use duskhaven_core::error::DomainError;
use thiserror::Error;

/// Startup and runtime errors for the server.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Database connection or pool error.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Network binding or I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),

    /// The content pack could not be loaded.
    #[error("content error: {0}")]
    Content(#[from] ContentError),

    /// The world could not be built from the content pack.
    #[error("world error: {0}")]
    World(#[from] DomainError),

    /// The engine loop has stopped accepting events.
    #[error("engine stopped")]
    EngineStopped,
}
