//! Table backends.
//!
//! A [`TableBackend`] speaks rows as `serde_json::Value` so one gateway can
//! serve every entity table. [`HttpBackend`] talks to the hosted REST
//! backend; [`MemoryBackend`] backs tests and offline development.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::BackendResult;

pub mod http;
pub mod memory;
pub mod retry;

pub use http::HttpBackend;
pub use memory::MemoryBackend;
pub use retry::{RetryConfig, RetryPolicy};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// A read query against one table: equality filters, optional ordering,
/// optional limit.
#[derive(Debug, Clone, Default)]
pub struct SelectQuery {
    pub filters: Vec<(String, String)>,
    pub order_by: Option<(String, SortOrder)>,
    pub limit: Option<usize>,
}

impl SelectQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push((column.into(), value.into()));
        self
    }

    pub fn order(mut self, column: impl Into<String>, order: SortOrder) -> Self {
        self.order_by = Some((column.into(), order));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// A query with no filters and no limit returns the whole table. Those
    /// are the only reads worth caching under the table key.
    pub fn is_unconstrained(&self) -> bool {
        self.filters.is_empty() && self.limit.is_none()
    }
}

/// Row-level access to one named table.
#[async_trait]
pub trait TableBackend: Send + Sync {
    async fn select(&self, table: &str, query: &SelectQuery) -> BackendResult<Vec<Value>>;

    /// Insert a row and return it as stored, server-assigned fields included.
    async fn insert(&self, table: &str, row: Value) -> BackendResult<Value>;

    /// Patch the row with the given id and return the updated row.
    async fn update_by_id(&self, table: &str, id: &str, patch: Value) -> BackendResult<Value>;

    async fn delete_by_id(&self, table: &str, id: &str) -> BackendResult<()>;
}
