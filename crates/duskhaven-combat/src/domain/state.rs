//! Encounter state machine: Idle → Active → Idle.

use std::fmt;

use duskhaven_core::ids::MobileId;
use serde::{Deserialize, Serialize};

/// Identifies either side of an encounter without borrowing it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CombatantRef {
    /// A player-controlled actor, by name.
    Actor(String),
    /// A live mobile instance.
    Mobile(MobileId),
}

impl fmt::Display for CombatantRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Actor(name) => write!(f, "actor:{name}"),
            Self::Mobile(id) => write!(f, "mobile:{id}"),
        }
    }
}

/// Per-combatant encounter state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CombatState {
    #[default]
    Idle,
    Active {
        /// The opponent.
        target: CombatantRef,
        /// Initiative rolled when the encounter began.
        initiative: i32,
        /// Virtual time (ms) of this side's most recent action.
        last_action_ms: u64,
    },
}

impl CombatState {
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active { .. })
    }

    /// The current opponent, if any.
    #[must_use]
    pub fn target(&self) -> Option<&CombatantRef> {
        match self {
            Self::Active { target, .. } => Some(target),
            Self::Idle => None,
        }
    }

    #[must_use]
    pub fn is_targeting(&self, other: &CombatantRef) -> bool {
        self.target() == Some(other)
    }

    pub fn engage(&mut self, target: CombatantRef, initiative: i32, now_ms: u64) {
        *self = Self::Active {
            target,
            initiative,
            last_action_ms: now_ms,
        };
    }

    /// Stamps the time of an action. No effect while idle.
    pub fn record_action(&mut self, now_ms: u64) {
        if let Self::Active { last_action_ms, .. } = self {
            *last_action_ms = now_ms;
        }
    }

    /// Time of the most recent action while active.
    #[must_use]
    pub fn last_action_ms(&self) -> Option<u64> {
        match self {
            Self::Active { last_action_ms, .. } => Some(*last_action_ms),
            Self::Idle => None,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::Idle;
    }
}
