//! Talking to other actors.

use duskhaven_core::error::DomainError;
use duskhaven_core::ids::SessionId;

use super::world::GameWorld;

impl GameWorld {
    /// Says something to everyone in the actor's location.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Rejected` for an empty message.
    pub fn say(&mut self, session: SessionId, text: &str) -> Result<(), DomainError> {
        let name = self.playing_actor(session)?;
        let text = text.trim();
        if text.is_empty() {
            return Err(DomainError::rejected("Say what?"));
        }
        let location = self.online(&name)?.location.clone();
        self.send(session, format!("You say, \"{text}\""));
        self.tell_room(&location, &format!("{name} says, \"{text}\""), Some(&name));
        Ok(())
    }

    /// Lists everyone in the world.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Rejected` if the session is not playing.
    pub fn who(&mut self, session: SessionId) -> Result<(), DomainError> {
        self.playing_actor(session)?;
        let online = self.status().online_actors;
        self.send(session, format!("{} online: {}", online.len(), online.join(", ")));
        Ok(())
    }
}
