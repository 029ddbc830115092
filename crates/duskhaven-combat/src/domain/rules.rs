//! Initiative, damage and encounter transitions.

use duskhaven_core::error::DomainError;
use duskhaven_core::rng::DeterministicRng;

use super::combatant::Combatant;

/// Lower and upper bound of the damage variance factor.
pub const DAMAGE_VARIANCE: (f64, f64) = (0.8, 1.2);

/// Experience awarded per level of a defeated mobile.
pub const EXPERIENCE_PER_LEVEL: u32 = 10;

/// Initiative rolled by both sides when an encounter begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Engagement {
    pub attacker_initiative: i32,
    pub defender_initiative: i32,
}

impl Engagement {
    /// Ties go to the attacker.
    #[must_use]
    pub fn attacker_first(&self) -> bool {
        self.attacker_initiative >= self.defender_initiative
    }
}

/// Result of one attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Strike {
    pub damage: i32,
    pub remaining_health: i32,
    pub lethal: bool,
}

/// `dexterity + d20`.
pub fn roll_initiative<C: Combatant + ?Sized>(combatant: &C, rng: &mut dyn DeterministicRng) -> i32 {
    let roll = i32::try_from(rng.next_u32_range(1, 20)).unwrap_or(20);
    combatant.base_dexterity().saturating_add(roll)
}

/// `floor((strength + weapon) * factor) - (armor + floor(constitution / 4))`, at least 1.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn damage_with_factor(
    strength: i32,
    weapon_damage: i32,
    armor_defense: i32,
    constitution: i32,
    factor: f64,
) -> i32 {
    let raw = (f64::from(strength.saturating_add(weapon_damage)) * factor).floor() as i32;
    let mitigation = armor_defense.saturating_add(constitution.div_euclid(4));
    raw.saturating_sub(mitigation).max(1)
}

/// Damage from `attacker` onto `defender` with a fresh variance roll.
pub fn calculate_damage<A, D>(attacker: &A, defender: &D, rng: &mut dyn DeterministicRng) -> i32
where
    A: Combatant + ?Sized,
    D: Combatant + ?Sized,
{
    let factor = rng.next_f64_range(DAMAGE_VARIANCE.0, DAMAGE_VARIANCE.1);
    damage_with_factor(
        attacker.base_strength(),
        attacker.weapon_damage(),
        defender.armor_defense(),
        defender.base_constitution(),
        factor,
    )
}

/// Experience for defeating a mobile of `level` (level 0 counts as 1).
#[must_use]
pub fn experience_for_kill(level: u32) -> u32 {
    EXPERIENCE_PER_LEVEL.saturating_mul(level.max(1))
}

/// Moves both sides from Idle to Active, targeting each other.
///
/// # Errors
///
/// Returns `DomainError::Rejected` if the attacker is already fighting, the
/// defender is dead, or the defender is busy with another opponent.
pub fn begin_encounter<A, D>(
    attacker: &mut A,
    defender: &mut D,
    rng: &mut dyn DeterministicRng,
    now_ms: u64,
) -> Result<Engagement, DomainError>
where
    A: Combatant + ?Sized,
    D: Combatant + ?Sized,
{
    if attacker.in_combat() {
        return Err(DomainError::rejected("You are already fighting!"));
    }
    if !defender.is_alive() {
        return Err(DomainError::rejected(format!(
            "The {} is already dead.",
            defender.display_name()
        )));
    }
    if defender.in_combat() {
        return Err(DomainError::rejected(format!(
            "{} is already fighting someone else.",
            defender.display_name()
        )));
    }

    let engagement = Engagement {
        attacker_initiative: roll_initiative(attacker, rng),
        defender_initiative: roll_initiative(defender, rng),
    };
    attacker
        .combat_state_mut()
        .engage(defender.combat_ref(), engagement.attacker_initiative, now_ms);
    defender
        .combat_state_mut()
        .engage(attacker.combat_ref(), engagement.defender_initiative, now_ms);
    Ok(engagement)
}

/// Whether a deferred turn between these two may still run.
pub fn still_engaged<A, D>(attacker: &A, defender: &D) -> bool
where
    A: Combatant + ?Sized,
    D: Combatant + ?Sized,
{
    attacker.is_alive()
        && defender.is_alive()
        && attacker.combat_state().is_targeting(&defender.combat_ref())
        && defender.combat_state().is_targeting(&attacker.combat_ref())
}

/// Applies one attack. Does not touch encounter state.
pub fn strike<A, D>(attacker: &A, defender: &mut D, rng: &mut dyn DeterministicRng) -> Strike
where
    A: Combatant + ?Sized,
    D: Combatant + ?Sized,
{
    let damage = calculate_damage(attacker, defender, rng);
    let remaining_health = defender.attributes_mut().take_damage(damage);
    Strike {
        damage,
        remaining_health,
        lethal: remaining_health <= 0,
    }
}

/// Returns both sides to Idle.
pub fn end_encounter<A, D>(a: &mut A, b: &mut D)
where
    A: Combatant + ?Sized,
    D: Combatant + ?Sized,
{
    a.combat_state_mut().reset();
    b.combat_state_mut().reset();
}
