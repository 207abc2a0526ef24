//! Cached table reads.
//!
//! Whole-table listings are what public pages render, so those are cached
//! under the table name, which is exactly the key the gateway invalidates.
//! Filtered or limited reads bypass the cache.

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use matchday_cache::TagCache;

use crate::backend::{SelectQuery, TableBackend};
use crate::error::{DataError, Result};
use crate::schema::EntityRecord;

pub struct ReadStore {
    backend: Arc<dyn TableBackend>,
    cache: Arc<TagCache>,
}

impl ReadStore {
    pub fn new(backend: Arc<dyn TableBackend>, cache: Arc<TagCache>) -> Self {
        Self { backend, cache }
    }

    /// Full listing of a table, served from cache when warm.
    pub async fn list<E: EntityRecord>(&self) -> Result<Vec<E>> {
        if let Some(rows) = self.cached_rows(E::TABLE).await {
            debug!(table = E::TABLE, "serving listing from cache");
            return decode(rows);
        }
        let rows = self
            .backend
            .select(E::TABLE, &SelectQuery::new())
            .await
            .map_err(|source| DataError::Read {
                table: E::TABLE,
                source,
            })?;
        if let Err(err) = self.cache.set(E::TABLE, &rows).await {
            debug!(table = E::TABLE, error = %err, "listing not cached");
        }
        decode(rows)
    }

    /// Constrained read. Never cached: the gateway invalidates by table
    /// name and cannot see per-query keys.
    pub async fn query<E: EntityRecord>(&self, query: &SelectQuery) -> Result<Vec<E>> {
        if query.is_unconstrained() {
            return self.list::<E>().await;
        }
        let rows = self
            .backend
            .select(E::TABLE, query)
            .await
            .map_err(|source| DataError::Read {
                table: E::TABLE,
                source,
            })?;
        decode(rows)
    }

    pub async fn get_by_id<E: EntityRecord>(&self, id: Uuid) -> Result<Option<E>> {
        let query = SelectQuery::new().filter("id", id.to_string()).limit(1);
        let rows = self
            .backend
            .select(E::TABLE, &query)
            .await
            .map_err(|source| DataError::Read {
                table: E::TABLE,
                source,
            })?;
        match rows.into_iter().next() {
            Some(row) => Ok(Some(serde_json::from_value(row)?)),
            None => Ok(None),
        }
    }

    async fn cached_rows(&self, table: &str) -> Option<Vec<Value>> {
        match self.cache.get::<Vec<Value>>(table).await {
            Ok(rows) => rows,
            Err(err) => {
                debug!(table, error = %err, "cache read failed, falling back to backend");
                None
            }
        }
    }
}

fn decode<E: EntityRecord>(rows: Vec<Value>) -> Result<Vec<E>> {
    rows.into_iter()
        .map(|row| serde_json::from_value(row).map_err(DataError::from))
        .collect()
}
