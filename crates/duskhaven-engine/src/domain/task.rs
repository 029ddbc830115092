//! Deferred work run from the world's task queue.

use duskhaven_combat::domain::state::CombatantRef;
use duskhaven_core::ids::{LocationId, MobileId};

/// A unit of deferred work. Every task re-checks its preconditions when it
/// fires; a task whose world has moved on does nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorldTask {
    /// `attacker` swings at `defender`.
    CombatTurn {
        attacker: CombatantRef,
        defender: CombatantRef,
    },
    /// A fresh instance of `template_id` appears in `location`.
    Respawn {
        template_id: String,
        location: LocationId,
    },
    /// Shows a revived actor where they woke up.
    ShowLocation { actor: String },
    /// Renders `node` of the conversation with the mobile spawned from `mobile`.
    DialogueContinue {
        actor: String,
        mobile: String,
        node: String,
    },
    /// A hostile mobile turns on an actor who entered its location.
    Aggro { mobile: MobileId, actor: String },
}

impl WorldTask {
    /// Whether the task acts on or for the named actor.
    #[must_use]
    pub fn involves_actor(&self, name: &str) -> bool {
        match self {
            Self::CombatTurn { attacker, defender } => {
                is_actor(attacker, name) || is_actor(defender, name)
            }
            Self::ShowLocation { actor }
            | Self::DialogueContinue { actor, .. }
            | Self::Aggro { actor, .. } => actor == name,
            Self::Respawn { .. } => false,
        }
    }

    /// Whether the task acts on or for the given mobile instance.
    #[must_use]
    pub fn involves_mobile(&self, id: MobileId) -> bool {
        match self {
            Self::CombatTurn { attacker, defender } => {
                *attacker == CombatantRef::Mobile(id) || *defender == CombatantRef::Mobile(id)
            }
            Self::Aggro { mobile, .. } => *mobile == id,
            _ => false,
        }
    }

    /// Whether this is a combat turn with `participant` on either side.
    #[must_use]
    pub fn is_turn_of(&self, participant: &CombatantRef) -> bool {
        matches!(self, Self::CombatTurn { attacker, defender }
            if attacker == participant || defender == participant)
    }

    /// Whether this is a pending dialogue continuation for the named actor.
    #[must_use]
    pub fn is_dialogue_of(&self, name: &str) -> bool {
        matches!(self, Self::DialogueContinue { actor, .. } if actor == name)
    }
}

fn is_actor(participant: &CombatantRef, name: &str) -> bool {
    matches!(participant, CombatantRef::Actor(actor) if actor == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combat_turn_involves_both_sides() {
        let wolf = MobileId::new();
        let task = WorldTask::CombatTurn {
            attacker: CombatantRef::Mobile(wolf),
            defender: CombatantRef::Actor("Alice".into()),
        };

        assert!(task.involves_actor("Alice"));
        assert!(task.involves_mobile(wolf));
        assert!(!task.involves_actor("Bob"));
        assert!(!task.involves_mobile(MobileId::new()));
    }

    #[test]
    fn test_respawn_involves_nobody() {
        let task = WorldTask::Respawn {
            template_id: "rat".into(),
            location: LocationId::from("square"),
        };

        assert!(!task.involves_actor("Alice"));
        assert!(!task.is_turn_of(&CombatantRef::Actor("Alice".into())));
    }

    #[test]
    fn test_dialogue_continuation_is_matched_by_actor() {
        let task = WorldTask::DialogueContinue {
            actor: "Alice".into(),
            mobile: "guard".into(),
            node: "passage".into(),
        };

        assert!(task.is_dialogue_of("Alice"));
        assert!(!task.is_dialogue_of("Bob"));
        assert!(task.involves_actor("Alice"));
    }
}
