//! In-memory table backend for tests and offline development.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{json, Value};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{SelectQuery, SortOrder, TableBackend};
use crate::error::{BackendError, BackendResult};

#[derive(Debug, Default)]
pub struct MemoryBackend {
    tables: RwLock<HashMap<String, Vec<Value>>>,
    fail_next: RwLock<Option<BackendError>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a table with pre-built rows. Rows keep whatever fields they have;
    /// no ids are assigned.
    pub async fn seed(&self, table: &str, rows: Vec<Value>) {
        self.tables.write().await.insert(table.to_string(), rows);
    }

    /// Make the next operation fail with the given error.
    pub async fn fail_next(&self, error: BackendError) {
        *self.fail_next.write().await = Some(error);
    }

    pub async fn row_count(&self, table: &str) -> usize {
        self.tables
            .read()
            .await
            .get(table)
            .map(Vec::len)
            .unwrap_or(0)
    }

    async fn take_injected_failure(&self) -> Option<BackendError> {
        self.fail_next.write().await.take()
    }
}

fn row_id(row: &Value) -> Option<&str> {
    row.get("id").and_then(Value::as_str)
}

fn matches_filters(row: &Value, filters: &[(String, String)]) -> bool {
    filters.iter().all(|(column, expected)| {
        match row.get(column) {
            Some(Value::String(s)) => s == expected,
            Some(other) => other.to_string() == *expected,
            None => false,
        }
    })
}

#[async_trait]
impl TableBackend for MemoryBackend {
    async fn select(&self, table: &str, query: &SelectQuery) -> BackendResult<Vec<Value>> {
        if let Some(err) = self.take_injected_failure().await {
            return Err(err);
        }
        let tables = self.tables.read().await;
        let mut rows: Vec<Value> = tables
            .get(table)
            .map(|rows| {
                rows.iter()
                    .filter(|row| matches_filters(row, &query.filters))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        if let Some((column, order)) = &query.order_by {
            rows.sort_by(|a, b| {
                let left = a.get(column).map(Value::to_string).unwrap_or_default();
                let right = b.get(column).map(Value::to_string).unwrap_or_default();
                match order {
                    SortOrder::Ascending => left.cmp(&right),
                    SortOrder::Descending => right.cmp(&left),
                }
            });
        }
        if let Some(limit) = query.limit {
            rows.truncate(limit);
        }
        Ok(rows)
    }

    async fn insert(&self, table: &str, row: Value) -> BackendResult<Value> {
        if let Some(err) = self.take_injected_failure().await {
            return Err(err);
        }
        let mut stored = match row {
            Value::Object(map) => Value::Object(map),
            other => {
                return Err(BackendError::new(format!(
                    "expected a JSON object row, got {other}"
                )))
            }
        };
        let fields = stored.as_object_mut().ok_or_else(|| BackendError::new("row is not an object"))?;
        if !fields.contains_key("id") {
            fields.insert("id".into(), json!(Uuid::new_v4()));
        }
        if !fields.contains_key("created_at") {
            fields.insert("created_at".into(), json!(Utc::now().to_rfc3339()));
        }
        self.tables
            .write()
            .await
            .entry(table.to_string())
            .or_default()
            .push(stored.clone());
        Ok(stored)
    }

    async fn update_by_id(&self, table: &str, id: &str, patch: Value) -> BackendResult<Value> {
        if let Some(err) = self.take_injected_failure().await {
            return Err(err);
        }
        let patch_fields = match patch {
            Value::Object(map) => map,
            other => {
                return Err(BackendError::new(format!(
                    "expected a JSON object patch, got {other}"
                )))
            }
        };
        let mut tables = self.tables.write().await;
        let rows = tables
            .get_mut(table)
            .ok_or_else(|| BackendError::not_found(table, id))?;
        let row = rows
            .iter_mut()
            .find(|row| row_id(row) == Some(id))
            .ok_or_else(|| BackendError::not_found(table, id))?;
        if let Some(fields) = row.as_object_mut() {
            for (key, value) in patch_fields {
                fields.insert(key, value);
            }
        }
        Ok(row.clone())
    }

    async fn delete_by_id(&self, table: &str, id: &str) -> BackendResult<()> {
        if let Some(err) = self.take_injected_failure().await {
            return Err(err);
        }
        let mut tables = self.tables.write().await;
        let rows = tables
            .get_mut(table)
            .ok_or_else(|| BackendError::not_found(table, id))?;
        let before = rows.len();
        rows.retain(|row| row_id(row) != Some(id));
        if rows.len() == before {
            return Err(BackendError::not_found(table, id));
        }
        Ok(())
    }
}
