//! Durable backing-store abstraction.

use std::collections::HashMap;
use std::fmt;

use async_trait::async_trait;

use crate::error::DomainError;

/// Composite key of a stored record, rendered as `"kind:id"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StoreKey {
    /// Record kind (e.g. `"actor"`).
    pub kind: String,
    /// Record identifier within its kind.
    pub id: String,
}

impl StoreKey {
    /// Creates a key from its parts.
    pub fn new(kind: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            id: id.into(),
        }
    }

    /// Parses a `"kind:id"` composite. The id may itself contain colons.
    #[must_use]
    pub fn parse(composite: &str) -> Option<Self> {
        let (kind, id) = composite.split_once(':')?;
        if kind.is_empty() || id.is_empty() {
            return None;
        }
        Some(Self::new(kind, id))
    }
}

impl fmt::Display for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

/// Key-value store for durable records, keyed by `"kind:id"`.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Writes (inserts or replaces) a record.
    async fn save(&self, kind: &str, id: &str, data: serde_json::Value)
    -> Result<(), DomainError>;

    /// Reads one record, `None` if absent.
    async fn load(&self, kind: &str, id: &str) -> Result<Option<serde_json::Value>, DomainError>;

    /// Reads every record of a kind, keyed by id.
    async fn load_all(&self, kind: &str)
    -> Result<HashMap<String, serde_json::Value>, DomainError>;

    /// Deletes a record. Deleting an absent record is not an error.
    async fn delete(&self, kind: &str, id: &str) -> Result<(), DomainError>;
}
