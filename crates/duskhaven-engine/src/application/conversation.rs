//! Talking to mobiles.
//!
//! Conversations are keyed by the mobile's template id, so an actor picks
//! up where they left off with a guard even after that guard respawns.

use duskhaven_content::domain::dialogue::{DEFAULT_NODE, DialogueAction};
use duskhaven_core::error::DomainError;
use duskhaven_core::ids::{MobileId, SessionId};
use duskhaven_dialogue::domain::conversation::{choose, close, fallback_line, present};
use tracing::{debug, instrument, warn};

use super::world::GameWorld;
use crate::domain::task::WorldTask;

impl GameWorld {
    /// Opens (or resumes) a conversation with a mobile in the actor's location.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Rejected` if no such mobile is here or either
    /// side is fighting.
    #[instrument(skip(self), fields(session = %session))]
    pub fn talk(&mut self, session: SessionId, query: &str) -> Result<(), DomainError> {
        let name = self.playing_actor(session)?;
        let query = query.trim();
        if query.is_empty() {
            return Err(DomainError::rejected("Talk to whom?"));
        }
        let actor = self
            .actors
            .get_mut(&name)
            .ok_or_else(|| DomainError::NotFound(format!("actor {name}")))?;
        let mobile = self
            .entities
            .find_mobile_in(&self.graph, &actor.location, query)
            .and_then(|id| self.entities.mobile(id))
            .ok_or_else(|| DomainError::rejected("You don't see that here."))?;
        if actor.combat.is_active() {
            return Err(DomainError::rejected("You can't talk while fighting!"));
        }
        if mobile.combat.is_active() {
            return Err(DomainError::rejected(format!(
                "The {} is busy fighting.",
                mobile.name
            )));
        }

        let template = self.entities.mobile_template(&mobile.template_id);
        let tree = template
            .and_then(|t| t.dialogue.as_ref())
            .filter(|tree| tree.node(DEFAULT_NODE).is_some());
        let lines = match tree {
            Some(tree) => {
                let state = actor.dialogue.focus(&mobile.template_id);
                let node = state.current_node.clone();
                present(state, tree, &mobile.name, &node)?
            }
            None => {
                let greeting = template.and_then(|t| t.greeting.as_deref());
                vec![fallback_line(&mobile.name, greeting, &name, self.rng.as_mut())]
            }
        };
        let mobile_name = mobile.name.clone();
        let location = actor.location.clone();

        self.scheduler.cancel_where(|task| task.is_dialogue_of(&name));
        self.tell_room(&location, &format!("{name} talks to the {mobile_name}."), Some(&name));
        for line in lines {
            self.send(session, line);
        }
        Ok(())
    }

    /// Picks a numbered response in the pending conversation.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` for a non-numeric choice and
    /// `DomainError::Rejected` if nothing is pending or the choice is out of range.
    #[instrument(skip(self), fields(session = %session))]
    pub fn respond(&mut self, session: SessionId, choice: &str) -> Result<(), DomainError> {
        let name = self.playing_actor(session)?;
        let index: usize = choice.trim().parse().map_err(|_| {
            DomainError::Validation("Respond with the number of your choice.".to_owned())
        })?;
        let actor = self
            .actors
            .get_mut(&name)
            .ok_or_else(|| DomainError::NotFound(format!("actor {name}")))?;
        let key = actor
            .dialogue
            .pending()
            .map(str::to_owned)
            .ok_or_else(|| DomainError::rejected("You are not in a conversation."))?;
        let Some((mobile_id, mobile_name)) = self
            .entities
            .mobiles_in(&self.graph, &actor.location)
            .into_iter()
            .find(|mobile| mobile.template_id == key)
            .map(|mobile| (mobile.id, mobile.name.clone()))
        else {
            actor.dialogue.entry(&key).reset();
            return Err(DomainError::rejected("They are no longer here."));
        };
        let response = choose(actor.dialogue.entry(&key), index)?;
        debug!(actor = %name, mobile = %key, choice = index, "dialogue response chosen");

        self.tell(&name, format!("You say, \"{}\"", response.text));
        if let Some(action) = &response.action {
            if self.run_dialogue_action(&name, &key, mobile_id, &mobile_name, action) {
                return Ok(());
            }
        }
        match response.next {
            Some(node) => {
                self.scheduler.schedule_in(
                    self.config.dialogue_delay_ms,
                    WorldTask::DialogueContinue {
                        actor: name,
                        mobile: key,
                        node,
                    },
                );
            }
            None => {
                let line = close(self.online_mut(&name)?.dialogue.entry(&key), &mobile_name);
                self.tell(&name, line);
            }
        }
        Ok(())
    }

    /// Applies a response's effect. Returns `true` if it ended the
    /// conversation by starting a fight.
    fn run_dialogue_action(
        &mut self,
        name: &str,
        key: &str,
        mobile_id: MobileId,
        mobile_name: &str,
        action: &DialogueAction,
    ) -> bool {
        let Some(actor) = self.actors.get_mut(name) else {
            return false;
        };
        match action {
            DialogueAction::Heal { amount } => {
                let restored = actor.attributes.heal(*amount);
                self.tell(name, format!("You feel better. (+{restored} health)"));
            }
            DialogueAction::GiveItem { item } => match self.entities.create_item(item) {
                Ok(item) => {
                    let line = format!("The {mobile_name} gives you the {}.", item.name);
                    actor.inventory.push(item);
                    self.tell(name, line);
                }
                Err(e) => warn!(mobile = %key, error = %e, "dialogue gift failed"),
            },
            DialogueAction::GrantExperience { amount } => {
                actor.stats.gain_experience(*amount);
                self.tell(name, format!("You gain {amount} experience."));
            }
            DialogueAction::Behavior { name: behavior } => {
                return self.mobile_behavior(name, key, mobile_id, behavior);
            }
        }
        self.save_actor(name);
        false
    }

    /// Hands a named behavior to the mobile. `attack` starts a fight.
    fn mobile_behavior(&mut self, name: &str, key: &str, mobile_id: MobileId, behavior: &str) -> bool {
        match behavior {
            "attack" => {
                if let Some(actor) = self.actors.get_mut(name) {
                    actor.dialogue.entry(key).reset();
                }
                match self.mobile_engages(mobile_id, name) {
                    Ok(()) => true,
                    Err(e) => {
                        debug!(actor = %name, mobile = %key, error = %e, "attack behavior rejected");
                        false
                    }
                }
            }
            other => {
                warn!(mobile = %key, behavior = other, "unknown mobile behavior");
                false
            }
        }
    }

    /// Renders the next node of a conversation if both sides are still
    /// here and at peace. Otherwise the conversation quietly resets.
    pub(crate) fn continue_dialogue(&mut self, name: &str, key: &str, node: &str) {
        let Some(actor) = self.actors.get_mut(name) else {
            return;
        };
        let mobile = self
            .entities
            .mobiles_in(&self.graph, &actor.location)
            .into_iter()
            .find(|mobile| mobile.template_id == key);
        let tree = self
            .entities
            .mobile_template(key)
            .and_then(|template| template.dialogue.as_ref());
        let (Some(mobile), Some(tree)) = (mobile, tree) else {
            actor.dialogue.entry(key).reset();
            debug!(actor = %name, mobile = %key, "dialogue continuation skipped");
            return;
        };
        if actor.combat.is_active() || mobile.combat.is_active() {
            actor.dialogue.entry(key).reset();
            return;
        }
        let state = actor.dialogue.focus(key);
        match present(state, tree, &mobile.name, node) {
            Ok(lines) => {
                for line in lines {
                    self.tell(name, line);
                }
            }
            Err(e) => warn!(actor = %name, mobile = %key, error = %e, "dialogue continuation failed"),
        }
    }
}
