//! Persistence gateway: loads actor records and writes them without
//! blocking gameplay.
//!
//! Saves are queued on an unbounded channel and written by a
//! [`PersistenceWriter`] running as its own task. A failed write is logged
//! and dropped; nothing is retried.

use std::sync::Arc;

use duskhaven_core::clock::Clock;
use duskhaven_core::store::StateStore;
use serde_json::Value;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::domain::actor::Actor;
use crate::domain::record::{ACTOR_KIND, ActorRecord};

/// One queued write.
#[derive(Debug, Clone)]
pub struct SaveRequest {
    pub name: String,
    pub data: Value,
}

/// Front door for actor persistence, owned by the engine.
pub struct PersistenceGateway {
    store: Arc<dyn StateStore>,
    clock: Arc<dyn Clock>,
    queue: mpsc::UnboundedSender<SaveRequest>,
}

impl std::fmt::Debug for PersistenceGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistenceGateway").finish_non_exhaustive()
    }
}

impl PersistenceGateway {
    /// Creates the gateway and the writer that drains its queue.
    #[must_use]
    pub fn new(store: Arc<dyn StateStore>, clock: Arc<dyn Clock>) -> (Self, PersistenceWriter) {
        let (queue, rx) = mpsc::unbounded_channel();
        let writer = PersistenceWriter {
            store: Arc::clone(&store),
            rx,
        };
        (Self { store, clock, queue }, writer)
    }

    /// Fetches and validates the record for `name`. Store failures and
    /// malformed records are logged and reported as not found.
    pub async fn load(&self, name: &str) -> Option<ActorRecord> {
        let value = match self.store.load(ACTOR_KIND, name).await {
            Ok(Some(value)) => value,
            Ok(None) => return None,
            Err(e) => {
                warn!(actor = %name, error = %e, "actor load failed, treating as new");
                return None;
            }
        };
        match ActorRecord::parse(name, value) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(actor = %name, error = %e, "rejecting malformed actor record");
                None
            }
        }
    }

    /// Queues a snapshot of `actor`. Never blocks and never fails.
    pub fn save(&self, actor: &Actor) {
        let record = ActorRecord::from_actor(actor, self.clock.now());
        let request = SaveRequest {
            name: actor.name.clone(),
            data: record.to_value(),
        };
        if self.queue.send(request).is_err() {
            warn!(actor = %actor.name, "persistence writer stopped, save dropped");
        }
    }
}

/// Background task that performs queued writes.
pub struct PersistenceWriter {
    store: Arc<dyn StateStore>,
    rx: mpsc::UnboundedReceiver<SaveRequest>,
}

impl PersistenceWriter {
    /// Writes requests until every gateway handle has been dropped.
    pub async fn run(mut self) {
        info!("persistence writer started");
        while let Some(request) = self.rx.recv().await {
            self.write(request).await;
        }
        info!("persistence writer stopped");
    }

    /// Writes everything queued so far and returns how many requests were
    /// processed.
    pub async fn drain(&mut self) -> usize {
        let mut processed = 0;
        while let Ok(request) = self.rx.try_recv() {
            self.write(request).await;
            processed += 1;
        }
        processed
    }

    async fn write(&self, request: SaveRequest) {
        match self.store.save(ACTOR_KIND, &request.name, request.data).await {
            Ok(()) => debug!(actor = %request.name, "actor saved"),
            Err(e) => warn!(actor = %request.name, error = %e, "actor save failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use duskhaven_core::ids::LocationId;
    use duskhaven_inventory::domain::item::Item;
    use duskhaven_test_support::{
        EmptyStateStore, FailingStateStore, FixedClock, RecordingStateStore, sample_pack,
    };
    use serde_json::json;

    fn clock() -> Arc<dyn Clock> {
        Arc::new(FixedClock(Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()))
    }

    #[tokio::test]
    async fn test_save_then_load_round_trips_durable_state() {
        // Arrange
        let store = Arc::new(RecordingStateStore::new());
        let (gateway, mut writer) = PersistenceGateway::new(store.clone(), clock());
        let pack = sample_pack();
        let mut actor = Actor::new("Alice", LocationId::from("market"));
        actor.attributes.health = 42;
        actor.stats.experience = 70;
        actor.stats.strength = 15;
        actor
            .inventory
            .push(Item::from_template(pack.item("apple").unwrap()));
        actor
            .equipment
            .insert(Item::from_template(pack.item("sword").unwrap()));

        // Act
        gateway.save(&actor);
        assert_eq!(writer.drain().await, 1);
        let loaded = gateway
            .load("Alice")
            .await
            .unwrap()
            .into_actor(&LocationId::from("square"));

        // Assert
        assert_eq!(loaded.attributes, actor.attributes);
        assert_eq!(loaded.stats, actor.stats);
        assert_eq!(loaded.location, actor.location);
        assert_eq!(loaded.inventory, actor.inventory);
        assert_eq!(loaded.equipment, actor.equipment);
        assert_eq!(store.saved()[0].0, "actor:Alice");
    }

    #[tokio::test]
    async fn test_load_missing_actor_is_none() {
        let (gateway, _writer) = PersistenceGateway::new(Arc::new(EmptyStateStore), clock());

        assert!(gateway.load("Nobody").await.is_none());
    }

    #[tokio::test]
    async fn test_load_failure_is_treated_as_not_found() {
        let (gateway, _writer) = PersistenceGateway::new(Arc::new(FailingStateStore), clock());

        assert!(gateway.load("Alice").await.is_none());
    }

    #[tokio::test]
    async fn test_load_rejects_record_with_non_numeric_health() {
        let store = Arc::new(RecordingStateStore::with_record(
            ACTOR_KIND,
            "Alice",
            json!({
                "name": "Alice",
                "attributes": {"health": "lots", "maxHealth": 100, "mana": 0,
                               "maxMana": 0, "stamina": 0, "maxStamina": 0},
                "stats": {"level": 1, "experience": 0, "strength": 10,
                          "intelligence": 10, "dexterity": 10, "constitution": 10}
            }),
        ));
        let (gateway, _writer) = PersistenceGateway::new(store, clock());

        assert!(gateway.load("Alice").await.is_none());
    }

    #[tokio::test]
    async fn test_failed_save_is_swallowed() {
        // Arrange
        let (gateway, mut writer) = PersistenceGateway::new(Arc::new(FailingStateStore), clock());
        let actor = Actor::new("Alice", LocationId::from("square"));

        // Act
        gateway.save(&actor);
        gateway.save(&actor);

        // Assert
        assert_eq!(writer.drain().await, 2);
    }

    #[tokio::test]
    async fn test_save_after_writer_dropped_does_not_panic() {
        let (gateway, writer) = PersistenceGateway::new(Arc::new(EmptyStateStore), clock());
        drop(writer);

        gateway.save(&Actor::new("Alice", LocationId::from("square")));
    }
}
