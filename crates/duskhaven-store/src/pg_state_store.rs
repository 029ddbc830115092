//! `PostgreSQL` implementation of the `StateStore` trait.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

use duskhaven_core::error::DomainError;
use duskhaven_core::store::StateStore;

use crate::schema::CREATE_WORLD_RECORDS_TABLE;

fn infra(e: &sqlx::Error) -> DomainError {
    DomainError::Infrastructure(e.to_string())
}

/// PostgreSQL-backed record store.
#[derive(Debug, Clone)]
pub struct PgStateStore {
    pool: PgPool,
}

impl PgStateStore {
    /// Creates a new `PgStateStore` over an existing pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects to `database_url` with a small pool.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` if the connection cannot be established.
    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;
        info!("connected to PostgreSQL");
        Ok(Self::new(pool))
    }

    /// Creates the records table if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` if the DDL fails.
    pub async fn ensure_schema(&self) -> Result<(), sqlx::Error> {
        sqlx::raw_sql(CREATE_WORLD_RECORDS_TABLE)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Returns a reference to the underlying pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl StateStore for PgStateStore {
    async fn save(&self, kind: &str, id: &str, data: Value) -> Result<(), DomainError> {
        sqlx::query(
            "INSERT INTO world_records (kind, id, data, updated_at) VALUES ($1, $2, $3, NOW()) \
             ON CONFLICT (kind, id) DO UPDATE SET data = EXCLUDED.data, updated_at = NOW()",
        )
        .bind(kind)
        .bind(id)
        .bind(data)
        .execute(&self.pool)
        .await
        .map_err(|e| infra(&e))?;
        Ok(())
    }

    async fn load(&self, kind: &str, id: &str) -> Result<Option<Value>, DomainError> {
        sqlx::query_scalar::<_, Value>("SELECT data FROM world_records WHERE kind = $1 AND id = $2")
            .bind(kind)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| infra(&e))
    }

    async fn load_all(&self, kind: &str) -> Result<HashMap<String, Value>, DomainError> {
        let rows = sqlx::query_as::<_, (String, Value)>(
            "SELECT id, data FROM world_records WHERE kind = $1",
        )
        .bind(kind)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| infra(&e))?;
        Ok(rows.into_iter().collect())
    }

    async fn delete(&self, kind: &str, id: &str) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM world_records WHERE kind = $1 AND id = $2")
            .bind(kind)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| infra(&e))?;
        Ok(())
    }
}
