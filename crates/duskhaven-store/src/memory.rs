//! In-memory `StateStore` for single-process runs without a database.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use duskhaven_core::error::DomainError;
use duskhaven_core::store::{StateStore, StoreKey};

/// Records kept in a mutex-guarded map. Contents are lost on exit.
#[derive(Debug, Default)]
pub struct MemoryStateStore {
    records: Mutex<HashMap<StoreKey, Value>>,
}

impl MemoryStateStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn with_records<T>(
        &self,
        f: impl FnOnce(&mut HashMap<StoreKey, Value>) -> T,
    ) -> Result<T, DomainError> {
        let mut records = self
            .records
            .lock()
            .map_err(|_| DomainError::Infrastructure("memory store lock poisoned".into()))?;
        Ok(f(&mut records))
    }
}

#[async_trait]
impl StateStore for MemoryStateStore {
    async fn save(&self, kind: &str, id: &str, data: Value) -> Result<(), DomainError> {
        self.with_records(|records| {
            records.insert(StoreKey::new(kind, id), data);
        })
    }

    async fn load(&self, kind: &str, id: &str) -> Result<Option<Value>, DomainError> {
        self.with_records(|records| records.get(&StoreKey::new(kind, id)).cloned())
    }

    async fn load_all(&self, kind: &str) -> Result<HashMap<String, Value>, DomainError> {
        self.with_records(|records| {
            records
                .iter()
                .filter(|(key, _)| key.kind == kind)
                .map(|(key, data)| (key.id.clone(), data.clone()))
                .collect()
        })
    }

    async fn delete(&self, kind: &str, id: &str) -> Result<(), DomainError> {
        self.with_records(|records| {
            records.remove(&StoreKey::new(kind, id));
        })
    }
}
