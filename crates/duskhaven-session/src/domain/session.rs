//! A live connection.

use chrono::{DateTime, Utc};
use duskhaven_core::ids::SessionId;

/// Where a session is in the login handshake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Prompted for a character name.
    AwaitingName,
    /// Bound to an actor that is in the world.
    Playing,
}

/// One connected client.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: SessionId,
    pub phase: SessionPhase,
    /// Bound actor name, set once login completes.
    pub actor: Option<String>,
    /// Wall-clock time the connection was accepted.
    pub connected_at: DateTime<Utc>,
    /// Virtual time (ms) of the last line received.
    pub last_activity_ms: u64,
}

impl Session {
    #[must_use]
    pub fn new(id: SessionId, connected_at: DateTime<Utc>, now_ms: u64) -> Self {
        Self {
            id,
            phase: SessionPhase::AwaitingName,
            actor: None,
            connected_at,
            last_activity_ms: now_ms,
        }
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.phase == SessionPhase::Playing
    }

    #[must_use]
    pub fn idle_for(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.last_activity_ms)
    }
}
