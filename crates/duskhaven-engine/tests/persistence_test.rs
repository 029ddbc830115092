//! Durable actor state across sessions.

mod common;

use std::sync::Arc;

use chrono::TimeZone;
use common::{harness, harness_with_store, login, saw};
use duskhaven_character::application::persistence::PersistenceGateway;
use duskhaven_engine::application::world::GameWorld;
use duskhaven_engine::domain::config::EngineConfig;
use duskhaven_test_support::{FailingStateStore, FixedClock, MockRng, RecordingStateStore, sample_pack};
use serde_json::{Value, json};

fn stored_alice(health: Value, location: &str) -> RecordingStateStore {
    RecordingStateStore::with_record(
        "actor",
        "Alice",
        json!({
            "name": "Alice",
            "attributes": {
                "health": health, "maxHealth": 100,
                "mana": 10, "maxMana": 50,
                "stamina": 90, "maxStamina": 100
            },
            "stats": {
                "level": 2, "experience": 30,
                "strength": 12, "intelligence": 9,
                "dexterity": 11, "constitution": 10
            },
            "location": location
        }),
    )
}

#[tokio::test]
async fn test_state_survives_logout_and_login() {
    // Arrange
    let mut h = harness();
    let session = login(&mut h.world, "Alice").await;
    h.world.take(session, "apple").unwrap();
    h.world.move_actor(session, "east").unwrap();
    h.world.actor_mut("Alice").unwrap().attributes.health = 64;
    h.world.end_session(session);
    h.writer.drain().await;

    // Act
    let again = h.world.begin_session();
    h.world.submit_name(again, "Alice").await.unwrap();

    // Assert
    assert!(saw(&h.world.take_lines(again), "Welcome back, Alice."));
    let actor = h.world.actor("Alice").unwrap();
    assert_eq!(actor.location.as_str(), "market");
    assert_eq!(actor.attributes.health, 64);
    assert!(actor.inventory.find("apple").is_some());
}

#[tokio::test]
async fn test_stored_health_above_max_is_clamped_on_login() {
    let mut h = harness_with_store(stored_alice(json!(150), "market"));

    login(&mut h.world, "Alice").await;

    let actor = h.world.actor("Alice").unwrap();
    assert_eq!(actor.attributes.health, 100);
    assert_eq!(actor.location.as_str(), "market");
    assert_eq!(actor.stats.strength, 12);
}

#[tokio::test]
async fn test_unknown_stored_location_falls_back_to_start() {
    let mut h = harness_with_store(stored_alice(json!(80), "atlantis"));

    login(&mut h.world, "Alice").await;

    assert_eq!(h.world.actor("Alice").unwrap().location.as_str(), "square");
}

#[tokio::test]
async fn test_out_of_range_stats_are_repaired_not_replaced() {
    // Arrange
    let store = RecordingStateStore::with_record(
        "actor",
        "Alice",
        json!({
            "name": "Alice",
            "attributes": {
                "health": 5_000_000_000_i64, "maxHealth": 100,
                "mana": 10, "maxMana": 50,
                "stamina": 90, "maxStamina": 100
            },
            "stats": {
                "level": -1, "experience": 4000,
                "strength": 18, "intelligence": 9,
                "dexterity": 11, "constitution": 10
            },
            "location": "market"
        }),
    );
    let mut h = harness_with_store(store);
    let session = h.world.begin_session();

    // Act
    h.world.submit_name(session, "Alice").await.unwrap();
    h.writer.drain().await;

    // Assert
    assert!(saw(&h.world.take_lines(session), "Welcome back, Alice."));
    let actor = h.world.actor("Alice").unwrap();
    assert_eq!(actor.stats.level, 1);
    assert_eq!(actor.stats.experience, 4000);
    assert_eq!(actor.stats.strength, 18);
    assert_eq!(actor.attributes.health, 100);
    assert_eq!(actor.location.as_str(), "market");
    assert!(h.store.saved().is_empty());
}

#[tokio::test]
async fn test_malformed_record_starts_a_new_character() {
    let mut h = harness_with_store(stored_alice(json!("lots"), "market"));
    let session = h.world.begin_session();

    h.world.submit_name(session, "Alice").await.unwrap();

    assert!(saw(&h.world.take_lines(session), "A new adventurer is born."));
    assert_eq!(h.world.actor("Alice").unwrap().stats.level, 1);
}

#[tokio::test]
async fn test_store_failures_never_reach_the_player() {
    // Arrange
    let clock = Arc::new(FixedClock(
        chrono::Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap(),
    ));
    let (gateway, mut writer) = PersistenceGateway::new(Arc::new(FailingStateStore), clock.clone());
    let mut world = GameWorld::new(
        EngineConfig::default(),
        Arc::new(sample_pack()),
        gateway,
        clock,
        Box::new(MockRng),
    )
    .unwrap();

    // Act
    let session = login(&mut world, "Alice").await;
    world.move_actor(session, "east").unwrap();
    let written = writer.drain().await;

    // Assert
    assert_eq!(written, 2);
    assert_eq!(world.actor("Alice").unwrap().location.as_str(), "market");
}
