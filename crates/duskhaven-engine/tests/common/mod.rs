//! Shared helpers for engine integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use chrono::TimeZone;
use duskhaven_character::application::persistence::{PersistenceGateway, PersistenceWriter};
use duskhaven_core::clock::Clock;
use duskhaven_core::ids::SessionId;
use duskhaven_core::rng::DeterministicRng;
use duskhaven_engine::application::world::GameWorld;
use duskhaven_engine::domain::config::EngineConfig;
use duskhaven_test_support::{FixedClock, FixedRng, RecordingStateStore, sample_pack};

/// A world over the sample pack plus the pieces tests poke at.
pub struct Harness {
    pub world: GameWorld,
    pub writer: PersistenceWriter,
    pub store: Arc<RecordingStateStore>,
}

fn fixed_clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock(
        chrono::Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap(),
    ))
}

/// Every roll is 10 (initiative 20 for dexterity 10) and every damage
/// factor is exactly 1.0.
pub fn harness() -> Harness {
    harness_with(Box::new(FixedRng::new(10, 1.0)), RecordingStateStore::new())
}

pub fn harness_with_rng(rng: Box<dyn DeterministicRng>) -> Harness {
    harness_with(rng, RecordingStateStore::new())
}

pub fn harness_with_store(store: RecordingStateStore) -> Harness {
    harness_with(Box::new(FixedRng::new(10, 1.0)), store)
}

pub fn harness_with(rng: Box<dyn DeterministicRng>, store: RecordingStateStore) -> Harness {
    let store = Arc::new(store);
    let (gateway, writer) = PersistenceGateway::new(store.clone(), fixed_clock());
    let world = GameWorld::new(
        EngineConfig::default(),
        Arc::new(sample_pack()),
        gateway,
        fixed_clock(),
        rng,
    )
    .unwrap();
    Harness {
        world,
        writer,
        store,
    }
}

/// Opens a session, logs in as `name` and discards the login output.
pub async fn login(world: &mut GameWorld, name: &str) -> SessionId {
    let session = world.begin_session();
    world.submit_name(session, name).await.unwrap();
    world.take_lines(session);
    session
}

/// Whether any of `lines` contains `needle`.
pub fn saw(lines: &[String], needle: &str) -> bool {
    lines.iter().any(|line| line.contains(needle))
}
