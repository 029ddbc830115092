//! Encounters, death and respawn on the virtual clock.

mod common;

use common::{harness, harness_with_rng, login, saw};
use duskhaven_combat::domain::state::CombatantRef;
use duskhaven_core::ids::LocationId;
use duskhaven_engine::domain::task::WorldTask;
use duskhaven_test_support::SequenceRng;

fn guard_health(h: &common::Harness) -> Option<i32> {
    let gate = LocationId::from("gate");
    h.world
        .entities()
        .mobiles_in(h.world.graph(), &gate)
        .into_iter()
        .find(|mobile| mobile.template_id == "guard")
        .map(|mobile| mobile.attributes.health)
}

#[tokio::test]
async fn test_killing_a_mobile_grants_experience_and_ends_combat() {
    // Arrange
    let mut h = harness();
    let session = login(&mut h.world, "Alice").await;

    // Act
    h.world.attack(session, "rat").unwrap();

    // Assert
    let lines = h.world.take_lines(session);
    assert!(saw(&lines, "You attack the giant rat!"));
    assert!(saw(&lines, "You have slain the giant rat!"));
    assert!(saw(&lines, "You gain 20 experience."));
    let actor = h.world.actor("Alice").unwrap();
    assert_eq!(actor.stats.experience, 20);
    assert!(!actor.combat.is_active());
    assert!(
        !h.world
            .entities()
            .has_template_in(h.world.graph(), &"square".into(), "rat")
    );
}

#[tokio::test]
async fn test_mobile_respawns_exactly_after_its_delay_with_full_health() {
    // Arrange
    let mut h = harness();
    let session = login(&mut h.world, "Alice").await;
    let square = LocationId::from("square");
    let died_at = h.world.now_ms();
    h.world.attack(session, "rat").unwrap();
    h.world.take_lines(session);

    // Act + Assert
    h.world.advance_to(died_at + 59_999);
    assert!(!h.world.entities().has_template_in(h.world.graph(), &square, "rat"));

    h.world.advance_to(died_at + 60_000);
    let rat = h
        .world
        .entities()
        .mobiles_in(h.world.graph(), &square)
        .into_iter()
        .find(|mobile| mobile.template_id == "rat")
        .unwrap();
    assert_eq!(rat.attributes.health, rat.attributes.max_health);
    assert_eq!(rat.attributes.health, 5);
    assert!(saw(&h.world.take_lines(session), "A giant rat appears."));
}

#[tokio::test]
async fn test_strength_15_unarmed_against_constitution_10_deals_13() {
    // Arrange
    let mut h = harness();
    let session = login(&mut h.world, "Alice").await;
    h.world.move_actor(session, "north").unwrap();
    h.world.actor_mut("Alice").unwrap().stats.strength = 15;

    // Act
    h.world.attack(session, "guard").unwrap();

    // Assert
    assert_eq!(guard_health(&h), Some(37));
    assert!(saw(&h.world.take_lines(session), "You hit the gate guard for 13 damage."));
}

#[tokio::test]
async fn test_counter_attack_fires_after_the_delay() {
    // Arrange
    let mut h = harness();
    let session = login(&mut h.world, "Alice").await;
    h.world.move_actor(session, "north").unwrap();
    h.world.attack(session, "guard").unwrap();

    // Act + Assert
    h.world.advance_by(1_499);
    assert_eq!(h.world.actor("Alice").unwrap().attributes.health, 100);
    h.world.advance_by(1);
    assert_eq!(h.world.actor("Alice").unwrap().attributes.health, 92);
    assert!(saw(
        &h.world.take_lines(session),
        "The gate guard hits you for 8 damage. (92/100)"
    ));
}

#[tokio::test]
async fn test_health_stays_in_bounds_until_the_encounter_ends() {
    // Arrange
    let mut h = harness();
    let session = login(&mut h.world, "Alice").await;
    h.world.move_actor(session, "north").unwrap();
    h.world.attack(session, "guard").unwrap();

    // Act
    let mut rounds = 0;
    while h.world.actor("Alice").unwrap().combat.is_active() && rounds < 100 {
        h.world.advance_by(1_500);
        rounds += 1;
        let a = h.world.actor("Alice").unwrap().attributes;
        assert!((0..=a.max_health).contains(&a.health));
        if let Some(health) = guard_health(&h) {
            assert!(health >= 0);
        }
    }

    // Assert
    assert!(rounds < 100);
    assert_eq!(guard_health(&h), None);
    assert_eq!(h.world.actor("Alice").unwrap().stats.experience, 30);
}

#[tokio::test]
async fn test_actor_killed_at_health_one_wakes_in_safe_location() {
    // Arrange: actor rolls 1 (initiative 11), guard rolls 20 (initiative 30).
    let mut h = harness_with_rng(Box::new(SequenceRng::new(vec![1, 20])));
    let session = login(&mut h.world, "Alice").await;
    h.world.move_actor(session, "north").unwrap();
    h.world.actor_mut("Alice").unwrap().attributes.health = 1;
    h.world.take_lines(session);

    // Act
    h.world.attack(session, "guard").unwrap();

    // Assert
    let actor = h.world.actor("Alice").unwrap();
    assert!(!actor.combat.is_active());
    assert_eq!(actor.location.as_str(), "temple");
    assert_eq!(actor.attributes.health, actor.attributes.max_health / 2);
    assert!(saw(
        &h.world.take_lines(session),
        "You have been slain by the gate guard!"
    ));
    let gate = h.world.graph().get(&"gate".into()).unwrap();
    assert!(!gate.has_occupant("Alice"));
    assert!(!h.world.has_task(|task| matches!(task, WorldTask::CombatTurn { .. })));

    h.world.advance_by(2_000);
    assert!(saw(&h.world.take_lines(session), "Temple of Rest"));
}

#[tokio::test]
async fn test_attack_while_fighting_is_rejected() {
    let mut h = harness();
    let session = login(&mut h.world, "Alice").await;
    h.world.move_actor(session, "north").unwrap();
    h.world.attack(session, "guard").unwrap();

    let err = h.world.attack(session, "guard").unwrap_err();

    assert_eq!(err.player_message(), "You are already fighting!");
}

#[tokio::test]
async fn test_attack_absent_target_is_rejected() {
    let mut h = harness();
    let session = login(&mut h.world, "Alice").await;

    let err = h.world.attack(session, "dragon").unwrap_err();

    assert_eq!(err.player_message(), "You don't see that here.");
    assert!(!h.world.actor("Alice").unwrap().combat.is_active());
}

#[tokio::test]
async fn test_disconnect_mid_combat_cancels_pending_turns() {
    // Arrange
    let mut h = harness();
    let session = login(&mut h.world, "Alice").await;
    h.world.move_actor(session, "north").unwrap();
    h.world.attack(session, "guard").unwrap();
    assert!(h.world.has_task(|task| task.involves_actor("Alice")));
    let wounded = guard_health(&h);

    // Act
    h.world.end_session(session);
    h.world.advance_by(10_000);

    // Assert
    assert!(!h.world.has_task(|task| task.involves_actor("Alice")));
    assert_eq!(guard_health(&h), wounded);
    let gate = LocationId::from("gate");
    let guard = h
        .world
        .entities()
        .mobiles_in(h.world.graph(), &gate)
        .into_iter()
        .find(|mobile| mobile.template_id == "guard")
        .unwrap();
    assert!(!guard.combat.is_active());
}

#[tokio::test]
async fn test_hostile_mobile_attacks_after_the_aggro_delay() {
    // Arrange
    let mut h = harness();
    let session = login(&mut h.world, "Alice").await;
    h.world.move_actor(session, "north").unwrap();
    h.world.move_actor(session, "north").unwrap();

    // Act + Assert
    h.world.advance_by(1_499);
    assert!(!h.world.actor("Alice").unwrap().combat.is_active());
    h.world.advance_by(1);
    let actor = h.world.actor("Alice").unwrap();
    assert!(actor.combat.is_active());
    assert_eq!(actor.attributes.health, 88);
    assert!(saw(&h.world.take_lines(session), "The grey wolf attacks you!"));
}

#[tokio::test]
async fn test_leaving_the_location_flees_the_encounter() {
    // Arrange
    let mut h = harness();
    let session = login(&mut h.world, "Alice").await;
    h.world.move_actor(session, "north").unwrap();
    h.world.move_actor(session, "north").unwrap();
    h.world.advance_by(1_500);
    h.world.take_lines(session);

    // Act
    h.world.move_actor(session, "south").unwrap();

    // Assert
    assert!(saw(&h.world.take_lines(session), "You flee from the grey wolf!"));
    assert!(!h.world.actor("Alice").unwrap().combat.is_active());
    let me = CombatantRef::Actor("Alice".into());
    assert!(!h.world.has_task(|task| task.is_turn_of(&me)));
}
