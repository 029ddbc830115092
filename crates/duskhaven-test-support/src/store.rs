//! Test stores: mock `StateStore` implementations for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use duskhaven_core::error::DomainError;
use duskhaven_core::store::{StateStore, StoreKey};
use serde_json::Value;

/// A store that keeps records in memory and remembers every `save` and
/// `delete` call in order.
#[derive(Debug, Default)]
pub struct RecordingStateStore {
    records: Mutex<HashMap<String, Value>>,
    saved: Mutex<Vec<(String, Value)>>,
    deleted: Mutex<Vec<String>>,
}

impl RecordingStateStore {
    /// Create an empty recording store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with one record.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn with_record(kind: &str, id: &str, data: Value) -> Self {
        let store = Self::new();
        store
            .records
            .lock()
            .unwrap()
            .insert(StoreKey::new(kind, id).to_string(), data);
        store
    }

    /// Returns a snapshot of all `(key, data)` pairs that were saved.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn saved(&self) -> Vec<(String, Value)> {
        self.saved.lock().unwrap().clone()
    }

    /// Returns the keys passed to `delete`.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn deleted(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }

    /// The record currently stored under `kind:id`.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn record(&self, kind: &str, id: &str) -> Option<Value> {
        self.records
            .lock()
            .unwrap()
            .get(&StoreKey::new(kind, id).to_string())
            .cloned()
    }
}

#[async_trait]
impl StateStore for RecordingStateStore {
    async fn save(&self, kind: &str, id: &str, data: Value) -> Result<(), DomainError> {
        let key = StoreKey::new(kind, id).to_string();
        self.saved.lock().unwrap().push((key.clone(), data.clone()));
        self.records.lock().unwrap().insert(key, data);
        Ok(())
    }

    async fn load(&self, kind: &str, id: &str) -> Result<Option<Value>, DomainError> {
        Ok(self.record(kind, id))
    }

    async fn load_all(&self, kind: &str) -> Result<HashMap<String, Value>, DomainError> {
        let records = self.records.lock().unwrap();
        Ok(records
            .iter()
            .filter_map(|(key, data)| {
                let parsed = StoreKey::parse(key)?;
                (parsed.kind == kind).then(|| (parsed.id, data.clone()))
            })
            .collect())
    }

    async fn delete(&self, kind: &str, id: &str) -> Result<(), DomainError> {
        let key = StoreKey::new(kind, id).to_string();
        self.deleted.lock().unwrap().push(key.clone());
        self.records.lock().unwrap().remove(&key);
        Ok(())
    }
}

/// A store that never has any record and silently accepts writes. Useful for
/// character-creation paths.
#[derive(Debug)]
pub struct EmptyStateStore;

#[async_trait]
impl StateStore for EmptyStateStore {
    async fn save(&self, _kind: &str, _id: &str, _data: Value) -> Result<(), DomainError> {
        Ok(())
    }

    async fn load(&self, _kind: &str, _id: &str) -> Result<Option<Value>, DomainError> {
        Ok(None)
    }

    async fn load_all(&self, _kind: &str) -> Result<HashMap<String, Value>, DomainError> {
        Ok(HashMap::new())
    }

    async fn delete(&self, _kind: &str, _id: &str) -> Result<(), DomainError> {
        Ok(())
    }
}

/// A store that always returns an infrastructure error. Useful for testing
/// that persistence failures never reach gameplay.
#[derive(Debug)]
pub struct FailingStateStore;

#[async_trait]
impl StateStore for FailingStateStore {
    async fn save(&self, _kind: &str, _id: &str, _data: Value) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn load(&self, _kind: &str, _id: &str) -> Result<Option<Value>, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn load_all(&self, _kind: &str) -> Result<HashMap<String, Value>, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn delete(&self, _kind: &str, _id: &str) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }
}
