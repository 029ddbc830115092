//! Domain error types.

use thiserror::Error;

/// Line shown to a player when the world data itself is inconsistent.
pub const BLOCKED_MESSAGE: &str = "Something blocks your way.";

/// Top-level domain error type.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A referenced entity (actor, item, mobile, location) was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Player input failed validation (bad name, malformed argument).
    #[error("validation error: {0}")]
    Validation(String),

    /// A gameplay precondition failed; the message is meant for the player.
    #[error("{0}")]
    Rejected(String),

    /// World data is inconsistent (e.g. an exit to a missing location).
    #[error("world integrity error: {0}")]
    Integrity(String),

    /// An infrastructure/persistence error.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}

impl DomainError {
    /// Shorthand for a player-facing rejection.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected(message.into())
    }

    /// Returns the line that should be shown to the issuing player.
    ///
    /// Integrity and infrastructure details are never leaked to players.
    #[must_use]
    pub fn player_message(&self) -> String {
        match self {
            Self::NotFound(msg) | Self::Validation(msg) | Self::Rejected(msg) => msg.clone(),
            Self::Integrity(_) => BLOCKED_MESSAGE.to_owned(),
            Self::Infrastructure(_) => "Something went wrong. Please try again.".to_owned(),
        }
    }
}
