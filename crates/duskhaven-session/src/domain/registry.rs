//! Session registry: every live session and the name-to-session binding.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use duskhaven_core::error::DomainError;
use duskhaven_core::ids::SessionId;
use tracing::{debug, info};

use super::session::{Session, SessionPhase};

/// Line shown when a name is already bound to another live session.
pub const ALREADY_LOGGED_IN: &str = "That character is already logged in.";

/// Live sessions keyed by id. An actor name is bound to at most one session.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: BTreeMap<SessionId, Session>,
    bindings: HashMap<String, SessionId>,
    next_id: u64,
}

impl SessionRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new connection awaiting its name.
    pub fn open(&mut self, connected_at: DateTime<Utc>, now_ms: u64) -> SessionId {
        self.next_id += 1;
        let id = SessionId(self.next_id);
        self.sessions.insert(id, Session::new(id, connected_at, now_ms));
        debug!(session = %id, "session opened");
        id
    }

    #[must_use]
    pub fn get(&self, id: SessionId) -> Option<&Session> {
        self.sessions.get(&id)
    }

    /// Session bound to `name`, if any.
    #[must_use]
    pub fn bound_to(&self, name: &str) -> Option<SessionId> {
        self.bindings.get(name).copied()
    }

    /// Actor name bound to `id`, if any.
    #[must_use]
    pub fn actor_of(&self, id: SessionId) -> Option<&str> {
        self.sessions.get(&id).and_then(|s| s.actor.as_deref())
    }

    /// Binds `name` to `id` and moves the session into play.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotFound` for an unknown session and
    /// `DomainError::Rejected` if the name is bound to a different session.
    pub fn bind(&mut self, id: SessionId, name: &str) -> Result<(), DomainError> {
        if let Some(existing) = self.bindings.get(name) {
            if *existing != id {
                return Err(DomainError::rejected(ALREADY_LOGGED_IN));
            }
        }
        let session = self
            .sessions
            .get_mut(&id)
            .ok_or_else(|| DomainError::NotFound(format!("session {id}")))?;
        session.actor = Some(name.to_owned());
        session.phase = SessionPhase::Playing;
        self.bindings.insert(name.to_owned(), id);
        info!(session = %id, actor = %name, "session bound");
        Ok(())
    }

    /// Records input activity.
    pub fn touch(&mut self, id: SessionId, now_ms: u64) {
        if let Some(session) = self.sessions.get_mut(&id) {
            session.last_activity_ms = now_ms;
        }
    }

    /// Removes a session and frees its name binding.
    pub fn close(&mut self, id: SessionId) -> Option<Session> {
        let session = self.sessions.remove(&id)?;
        if let Some(name) = &session.actor {
            if self.bindings.get(name) == Some(&id) {
                self.bindings.remove(name);
            }
        }
        debug!(session = %id, "session closed");
        Some(session)
    }

    /// Sessions whose last activity is at least `timeout_ms` old.
    #[must_use]
    pub fn idle_sessions(&self, now_ms: u64, timeout_ms: u64) -> Vec<SessionId> {
        self.sessions
            .values()
            .filter(|s| s.idle_for(now_ms) >= timeout_ms)
            .map(|s| s.id)
            .collect()
    }

    /// Ids of sessions bound to an actor, in id order.
    #[must_use]
    pub fn playing(&self) -> Vec<SessionId> {
        self.sessions
            .values()
            .filter(|s| s.is_playing())
            .map(|s| s.id)
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
