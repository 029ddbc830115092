//! Repairs applied to every actor coming back into the world.

use duskhaven_core::ids::LocationId;

use super::actor::Actor;

/// Something [`restore`] had to fix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Repair {
    /// At least one attribute was outside `[floor, max]`.
    Attributes,
    /// At least one base stat was negative or the level was zero.
    Stats,
    /// The actor was still marked as fighting.
    Combat,
    /// The stored location does not exist.
    Location { stored: LocationId },
}

/// Clamps attributes and stats, clears combat and conversations, and moves
/// the actor to `start` when its location is unknown. Returns the repairs made.
pub fn restore(
    actor: &mut Actor,
    start: &LocationId,
    location_exists: impl Fn(&LocationId) -> bool,
) -> Vec<Repair> {
    let mut repairs = Vec::new();
    if actor.attributes.repair() {
        repairs.push(Repair::Attributes);
    }
    if actor.stats.repair() {
        repairs.push(Repair::Stats);
    }
    if actor.combat.is_active() {
        actor.combat.reset();
        repairs.push(Repair::Combat);
    }
    actor.dialogue.interrupt_all();
    if !location_exists(&actor.location) {
        let stored = std::mem::replace(&mut actor.location, start.clone());
        repairs.push(Repair::Location { stored });
    }
    repairs
}
