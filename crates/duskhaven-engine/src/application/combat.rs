//! Encounters between actors and mobiles, driven by the task queue.
//!
//! Only the opening blow of an encounter happens inline. Every later turn
//! is a [`WorldTask::CombatTurn`] queued after the counter-attack delay,
//! and each one re-checks that both sides are still fighting each other.

use duskhaven_combat::domain::rules::{
    begin_encounter, end_encounter, experience_for_kill, still_engaged, strike,
};
use duskhaven_combat::domain::state::CombatantRef;
use duskhaven_core::error::DomainError;
use duskhaven_core::ids::{LocationId, MobileId, SessionId};
use tracing::{debug, info, instrument, warn};

use super::world::GameWorld;
use crate::domain::task::WorldTask;

impl GameWorld {
    /// Starts a fight between the session's actor and a mobile in the same
    /// location. The side with the higher initiative strikes at once.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Rejected` if the actor is already fighting, no
    /// matching mobile is present, or the target cannot be fought.
    #[instrument(skip(self), fields(session = %session))]
    pub fn attack(&mut self, session: SessionId, target: &str) -> Result<(), DomainError> {
        let name = self.playing_actor(session)?;
        let target = target.trim();
        if target.is_empty() {
            return Err(DomainError::rejected("Attack what?"));
        }
        let actor = self.online(&name)?;
        if actor.combat.is_active() {
            return Err(DomainError::rejected("You are already fighting!"));
        }
        let mobile = self
            .entities
            .find_mobile_in(&self.graph, &actor.location, target)
            .ok_or_else(|| DomainError::rejected("You don't see that here."))?;
        self.open_encounter(&name, mobile, true)
    }

    /// Has a mobile start a fight with the named actor.
    pub(crate) fn mobile_engages(&mut self, mobile: MobileId, name: &str) -> Result<(), DomainError> {
        self.open_encounter(name, mobile, false)
    }

    fn open_encounter(
        &mut self,
        name: &str,
        mobile_id: MobileId,
        actor_attacks: bool,
    ) -> Result<(), DomainError> {
        let now = self.scheduler.now_ms();
        let actor = self
            .actors
            .get_mut(name)
            .ok_or_else(|| DomainError::NotFound(format!("actor {name}")))?;
        let mobile = self
            .entities
            .mobile_mut(mobile_id)
            .ok_or_else(|| DomainError::rejected("You don't see that here."))?;
        let engagement = if actor_attacks {
            begin_encounter(actor, mobile, self.rng.as_mut(), now)?
        } else {
            begin_encounter(mobile, actor, self.rng.as_mut(), now)?
        };
        actor.dialogue.interrupt_all();
        let mobile_name = mobile.name.clone();
        let location = actor.location.clone();
        info!(
            actor = %name,
            mobile = %mobile_id,
            actor_attacks,
            attacker_initiative = engagement.attacker_initiative,
            defender_initiative = engagement.defender_initiative,
            "encounter started"
        );

        self.scheduler.cancel_where(|task| task.is_dialogue_of(name));
        if actor_attacks {
            self.tell(name, format!("You attack the {mobile_name}!"));
            self.tell_room(&location, &format!("{name} attacks the {mobile_name}!"), Some(name));
        } else {
            self.tell(name, format!("The {mobile_name} attacks you!"));
            self.tell_room(&location, &format!("The {mobile_name} attacks {name}!"), Some(name));
        }

        let actor_ref = CombatantRef::Actor(name.to_owned());
        let mobile_ref = CombatantRef::Mobile(mobile_id);
        let (attacker, defender) = if actor_attacks {
            (actor_ref, mobile_ref)
        } else {
            (mobile_ref, actor_ref)
        };
        if engagement.attacker_first() {
            self.resolve_turn(&attacker, &defender);
        } else {
            self.resolve_turn(&defender, &attacker);
        }
        Ok(())
    }

    /// One attack. Stale turns (either side gone, dead, or fighting someone
    /// else) are skipped without output.
    pub(crate) fn resolve_turn(&mut self, attacker: &CombatantRef, defender: &CombatantRef) {
        let (name, mobile_id, actor_attacks) = match (attacker, defender) {
            (CombatantRef::Actor(name), CombatantRef::Mobile(id)) => (name.as_str(), *id, true),
            (CombatantRef::Mobile(id), CombatantRef::Actor(name)) => (name.as_str(), *id, false),
            _ => {
                warn!(%attacker, %defender, "combat turn between unsupported participants");
                return;
            }
        };
        let (Some(actor), Some(mobile)) = (
            self.actors.get_mut(name),
            self.entities.mobile_mut(mobile_id),
        ) else {
            debug!(%attacker, %defender, "combat turn skipped, participant gone");
            return;
        };
        let engaged = if actor_attacks {
            still_engaged(&*actor, &*mobile)
        } else {
            still_engaged(&*mobile, &*actor)
        };
        if !engaged {
            debug!(%attacker, %defender, "stale combat turn skipped");
            return;
        }
        if actor.location != mobile.location {
            end_encounter(actor, mobile);
            debug!(%attacker, %defender, "combatants separated, encounter ended");
            return;
        }

        let now = self.scheduler.now_ms();
        let blow = if actor_attacks {
            let blow = strike(&*actor, mobile, self.rng.as_mut());
            actor.combat.record_action(now);
            blow
        } else {
            let blow = strike(&*mobile, actor, self.rng.as_mut());
            mobile.combat.record_action(now);
            blow
        };
        let mobile_name = mobile.name.clone();
        let location = actor.location.clone();
        let (health, max_health) = (actor.attributes.health, actor.attributes.max_health);
        debug!(%attacker, %defender, damage = blow.damage, remaining = blow.remaining_health, "strike");

        if actor_attacks {
            self.tell(name, format!("You hit the {mobile_name} for {} damage.", blow.damage));
            self.tell_room(&location, &format!("{name} hits the {mobile_name}."), Some(name));
        } else {
            self.tell(
                name,
                format!(
                    "The {mobile_name} hits you for {} damage. ({health}/{max_health})",
                    blow.damage
                ),
            );
            self.tell_room(&location, &format!("The {mobile_name} hits {name}."), Some(name));
        }

        if !blow.lethal {
            self.scheduler.schedule_in(
                self.config.counter_attack_delay_ms,
                WorldTask::CombatTurn {
                    attacker: defender.clone(),
                    defender: attacker.clone(),
                },
            );
        } else if actor_attacks {
            self.mobile_slain(name, mobile_id);
        } else {
            self.actor_slain(name, mobile_id);
        }
    }

    fn mobile_slain(&mut self, name: &str, mobile_id: MobileId) {
        self.scheduler.cancel_where(|task| task.involves_mobile(mobile_id));
        let Some(mobile) = self.entities.remove_mobile(&mut self.graph, mobile_id) else {
            return;
        };
        let experience = experience_for_kill(mobile.stats.level);
        let Some(actor) = self.actors.get_mut(name) else {
            return;
        };
        actor.combat.reset();
        actor.stats.gain_experience(experience);
        info!(actor = %name, mobile = %mobile.template_id, experience, "mobile slain");

        self.tell(name, format!("You have slain the {}!", mobile.name));
        self.tell(name, format!("You gain {experience} experience."));
        self.tell_room(
            &mobile.location,
            &format!("{name} has slain the {}!", mobile.name),
            Some(name),
        );
        self.save_actor(name);

        if let Some(delay) = mobile.respawn_ms {
            self.scheduler.schedule_in(
                delay,
                WorldTask::Respawn {
                    template_id: mobile.template_id,
                    location: mobile.location,
                },
            );
        }
    }

    fn actor_slain(&mut self, name: &str, mobile_id: MobileId) {
        let actor_ref = CombatantRef::Actor(name.to_owned());
        let mobile_ref = CombatantRef::Mobile(mobile_id);
        self.scheduler.cancel_where(|task| {
            task.is_turn_of(&actor_ref) || task.is_turn_of(&mobile_ref) || task.is_dialogue_of(name)
        });
        let mobile_name = match self.entities.mobile_mut(mobile_id) {
            Some(mobile) => {
                mobile.combat.reset();
                mobile.name.clone()
            }
            None => "enemy".to_owned(),
        };

        let safe = self.config.safe_location.clone();
        let fraction = self.config.death_heal_fraction;
        let Some(actor) = self.actors.get_mut(name) else {
            return;
        };
        actor.combat.reset();
        actor.dialogue.interrupt_all();
        actor.attributes.heal_to_fraction(fraction);
        let died_at = std::mem::replace(&mut actor.location, safe.clone());
        if let Some(room) = self.graph.get_mut(&died_at) {
            room.remove_occupant(name);
        }
        if let Some(room) = self.graph.get_mut(&safe) {
            room.add_occupant(name);
        }
        info!(actor = %name, location = %died_at, "actor slain");

        self.tell(name, format!("You have been slain by the {mobile_name}!"));
        self.tell_room(
            &died_at,
            &format!("{name} has been slain by the {mobile_name}!"),
            Some(name),
        );
        self.tell_room(&safe, &format!("{name} appears, pale and shaken."), Some(name));
        self.save_actor(name);
        self.scheduler.schedule_in(
            self.config.death_display_delay_ms,
            WorldTask::ShowLocation {
                actor: name.to_owned(),
            },
        );
    }

    pub(crate) fn show_revival(&mut self, name: &str) {
        if !self.actors.contains_key(name) {
            return;
        }
        self.tell(name, "You awaken, weakened but alive.");
        if let Err(e) = self.show_location(name) {
            warn!(actor = %name, error = %e, "cannot show revival location");
        }
    }

    /// Ends the named actor's encounter without a victor and cancels the
    /// pending turns of both sides. Returns the opponent's name.
    pub(crate) fn abort_encounter(&mut self, name: &str) -> Option<String> {
        let actor = self.actors.get_mut(name)?;
        let target = actor.combat.target().cloned()?;
        actor.combat.reset();
        let me = CombatantRef::Actor(name.to_owned());
        let cancelled = self
            .scheduler
            .cancel_where(|task| task.is_turn_of(&me) || task.is_turn_of(&target));

        let opponent = match &target {
            CombatantRef::Mobile(id) => self.entities.mobile_mut(*id).map(|mobile| {
                if mobile.combat.is_targeting(&me) {
                    mobile.combat.reset();
                }
                mobile.name.clone()
            }),
            CombatantRef::Actor(other) => self.actors.get_mut(other).map(|other| {
                if other.combat.is_targeting(&me) {
                    other.combat.reset();
                }
                other.name.clone()
            }),
        };
        info!(actor = %name, opponent = %target, cancelled, "encounter aborted");
        opponent
    }

    pub(crate) fn respawn(&mut self, template_id: &str, location: &LocationId) {
        match self
            .entities
            .spawn_mobile(&mut self.graph, template_id, location)
        {
            Ok(id) => {
                let Some(mobile) = self.entities.mobile(id) else {
                    return;
                };
                let line = format!("A {} appears.", mobile.name);
                let hostile = mobile.hostile;
                info!(mobile = %id, template = template_id, location = %location, "mobile respawned");
                self.tell_room(location, &line, None);
                if hostile {
                    for name in self.graph.broadcast_targets(location) {
                        self.schedule_aggro(id, &name);
                    }
                }
            }
            Err(e) => warn!(template = template_id, location = %location, error = %e, "respawn failed"),
        }
    }

    /// Queues every idle hostile mobile in the actor's location to turn on them.
    pub(crate) fn provoke_hostiles(&mut self, name: &str) {
        let Some(actor) = self.actors.get(name) else {
            return;
        };
        let hostiles: Vec<MobileId> = self
            .entities
            .mobiles_in(&self.graph, &actor.location)
            .into_iter()
            .filter(|mobile| mobile.hostile && !mobile.combat.is_active())
            .map(|mobile| mobile.id)
            .collect();
        for mobile in hostiles {
            self.schedule_aggro(mobile, name);
        }
    }

    fn schedule_aggro(&mut self, mobile: MobileId, name: &str) {
        let already = self.scheduler.any(|task| {
            matches!(task, WorldTask::Aggro { mobile: m, actor } if *m == mobile && actor == name)
        });
        if !already {
            self.scheduler.schedule_in(
                self.config.aggro_delay_ms,
                WorldTask::Aggro {
                    mobile,
                    actor: name.to_owned(),
                },
            );
        }
    }

    pub(crate) fn aggro(&mut self, mobile_id: MobileId, name: &str) {
        let (Some(actor), Some(mobile)) = (self.actors.get(name), self.entities.mobile(mobile_id)) else {
            return;
        };
        let ready = mobile.hostile
            && !mobile.combat.is_active()
            && !actor.combat.is_active()
            && actor.location == mobile.location;
        if !ready {
            debug!(actor = %name, mobile = %mobile_id, "aggro skipped");
            return;
        }
        if let Err(e) = self.mobile_engages(mobile_id, name) {
            debug!(actor = %name, mobile = %mobile_id, error = %e, "aggro rejected");
        }
    }
}
