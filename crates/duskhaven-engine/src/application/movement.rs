//! Looking around and walking between locations.

use duskhaven_core::error::DomainError;
use duskhaven_core::ids::SessionId;
use duskhaven_world::domain::direction::{arrival_message, normalize};
use tracing::{debug, instrument};

use super::world::GameWorld;

impl GameWorld {
    /// Shows the actor's current location.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Rejected` if the session is not playing.
    pub fn look(&mut self, session: SessionId) -> Result<(), DomainError> {
        let name = self.playing_actor(session)?;
        self.show_location(&name)
    }

    /// Moves the actor through the exit named `direction`.
    ///
    /// A fight in progress is abandoned. The actor stays put if the exit is
    /// absent or leads nowhere.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Rejected` for a missing exit and
    /// `DomainError::Integrity` for an exit to a location that does not exist.
    #[instrument(skip(self), fields(session = %session))]
    pub fn move_actor(&mut self, session: SessionId, direction: &str) -> Result<(), DomainError> {
        let name = self.playing_actor(session)?;
        let from = self.online(&name)?.location.clone();
        let to = self.graph.destination(&from, direction)?;
        let direction = normalize(direction);

        if let Some(opponent) = self.abort_encounter(&name) {
            self.tell(&name, format!("You flee from the {opponent}!"));
        }
        self.scheduler.cancel_where(|task| task.is_dialogue_of(&name));
        let actor = self.online_mut(&name)?;
        actor.dialogue.interrupt_all();
        actor.location = to.clone();

        self.graph.require_mut(&from)?.remove_occupant(&name);
        self.tell_room(&from, &format!("{name} leaves {direction}."), None);
        self.tell_room(&to, &arrival_message(&name, &direction), None);
        self.graph.require_mut(&to)?.add_occupant(&name);
        debug!(actor = %name, from = %from, to = %to, "actor moved");

        self.save_actor(&name);
        self.show_location(&name)?;
        self.provoke_hostiles(&name);
        Ok(())
    }
}
