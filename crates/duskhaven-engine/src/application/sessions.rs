//! Session lifecycle: the name handshake, logout, and idle reaping.

use duskhaven_character::domain::actor::Actor;
use duskhaven_character::domain::restore::restore;
use duskhaven_core::error::DomainError;
use duskhaven_core::ids::SessionId;
use duskhaven_session::domain::name::validate_name;
use duskhaven_session::domain::registry::ALREADY_LOGGED_IN;
use tracing::{info, instrument, warn};

use super::world::GameWorld;

/// Prompt sent to a session that has not chosen a name yet.
pub const NAME_PROMPT: &str = "By what name are you known?";

impl GameWorld {
    /// Registers a new connection and asks for a name.
    pub fn begin_session(&mut self) -> SessionId {
        let session = self
            .sessions
            .open(self.clock.now(), self.scheduler.now_ms());
        self.send(session, "Welcome to Duskhaven.");
        self.send(session, NAME_PROMPT);
        session
    }

    /// Runs [`GameWorld::submit_name`] and, on failure, tells the session
    /// why and prompts again.
    pub async fn handle_login_line(&mut self, session: SessionId, raw: &str) {
        if let Err(e) = self.submit_name(session, raw).await {
            self.send(session, e.player_message());
            self.send(session, NAME_PROMPT);
        }
    }

    /// Binds `session` to the actor called `raw`, loading it if it has been
    /// saved before and creating it otherwise, then places it in the world.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` for a malformed name and
    /// `DomainError::Rejected` if the name is already in play or the session
    /// is not awaiting a name. Nothing changes on error.
    #[instrument(skip(self), fields(session = %session))]
    pub async fn submit_name(&mut self, session: SessionId, raw: &str) -> Result<(), DomainError> {
        let awaiting = self
            .sessions
            .get(session)
            .ok_or_else(|| DomainError::NotFound(format!("session {session}")))?
            .actor
            .is_none();
        if !awaiting {
            return Err(DomainError::rejected("You are already playing."));
        }
        let name = validate_name(raw)?;
        if self.sessions.bound_to(&name).is_some() {
            return Err(DomainError::rejected(ALREADY_LOGGED_IN));
        }

        let start = self.config.start_location.clone();
        let (mut actor, created) = match self.persistence.load(&name).await {
            Some(record) => (record.into_actor(&start), false),
            None => (Actor::new(name.clone(), start.clone()), true),
        };
        let graph = &self.graph;
        let repairs = restore(&mut actor, &start, |id| graph.contains(id));
        if !repairs.is_empty() {
            warn!(actor = %name, ?repairs, "repaired actor record on login");
        }

        self.sessions.bind(session, &name)?;
        let location = actor.location.clone();
        self.graph.require_mut(&location)?.add_occupant(&name);
        self.actors.insert(name.clone(), actor);
        info!(actor = %name, location = %location, created, "actor entered the world");

        if created {
            self.send(session, format!("Welcome, {name}! A new adventurer is born."));
            self.save_actor(&name);
        } else {
            self.send(session, format!("Welcome back, {name}."));
        }
        self.tell_room(&location, &format!("{name} has entered the world."), Some(&name));
        self.show_location(&name)?;
        self.provoke_hostiles(&name);
        Ok(())
    }

    /// Tears a session down: saves and removes its actor, stops any fight
    /// or conversation, and frees the name. Unknown sessions are ignored.
    #[instrument(skip(self), fields(session = %session))]
    pub fn end_session(&mut self, session: SessionId) {
        let Some(name) = self.sessions.actor_of(session).map(str::to_owned) else {
            self.sessions.close(session);
            return;
        };

        self.abort_encounter(&name);
        let cancelled = self.scheduler.cancel_where(|task| task.involves_actor(&name));
        if let Some(actor) = self.actors.get_mut(&name) {
            actor.dialogue.interrupt_all();
        }
        self.save_actor(&name);

        if let Some(actor) = self.actors.remove(&name) {
            if let Some(room) = self.graph.get_mut(&actor.location) {
                room.remove_occupant(&name);
            }
            self.tell_room(
                &actor.location,
                &format!("{name} has left the world."),
                Some(&name),
            );
        }
        self.sessions.close(session);
        info!(actor = %name, cancelled, "actor left the world");
    }

    /// Says goodbye, ends the session and asks the host to close it.
    pub fn quit(&mut self, session: SessionId) {
        if let Ok(name) = self.playing_actor(session) {
            self.send(session, format!("Farewell, {name}."));
        }
        self.end_session(session);
        self.outbox.close(session);
    }

    /// Ends every session idle for at least the configured timeout.
    /// Returns the sessions that were ended.
    pub fn reap_idle(&mut self) -> Vec<SessionId> {
        let idle = self
            .sessions
            .idle_sessions(self.scheduler.now_ms(), self.config.idle_timeout_ms);
        for &session in &idle {
            info!(session = %session, "reaping idle session");
            self.send(session, "You have been idle too long. Goodbye.");
            self.end_session(session);
            self.outbox.close(session);
        }
        idle
    }
}
