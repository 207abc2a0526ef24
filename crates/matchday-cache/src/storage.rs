//! Cache storage backend

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::Result;

/// A stored value plus its freshness envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry<T: Clone> {
    pub data: T,
    pub created_at: SystemTime,
    pub expires_at: Option<SystemTime>,
}

impl<T: Clone> CacheEntry<T> {
    pub fn new(data: T, ttl: Option<Duration>) -> Self {
        let created_at = SystemTime::now();
        Self {
            data,
            created_at,
            expires_at: ttl.map(|t| created_at + t),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.expires_at
            .map(|expires| SystemTime::now() > expires)
            .unwrap_or(false)
    }
}

/// Raw key/value store underneath [`crate::TagCache`].
#[async_trait]
pub trait CacheStorage: Send + Sync {
    async fn set(&self, key: &str, value: &serde_json::Value) -> Result<()>;

    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>>;

    async fn remove(&self, key: &str) -> Result<bool>;

    async fn contains(&self, key: &str) -> Result<bool>;

    async fn clear(&self) -> Result<()>;

    async fn len(&self) -> Result<usize>;

    async fn keys(&self) -> Result<Vec<String>>;
}

/// In-memory storage; the only backend the presentation layer needs.
pub struct MemoryStorage {
    data: Arc<RwLock<HashMap<String, serde_json::Value>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheStorage for MemoryStorage {
    async fn set(&self, key: &str, value: &serde_json::Value) -> Result<()> {
        self.data.write().await.insert(key.to_string(), value.clone());
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>> {
        Ok(self.data.read().await.get(key).cloned())
    }

    async fn remove(&self, key: &str) -> Result<bool> {
        Ok(self.data.write().await.remove(key).is_some())
    }

    async fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.data.read().await.contains_key(key))
    }

    async fn clear(&self) -> Result<()> {
        self.data.write().await.clear();
        Ok(())
    }

    async fn len(&self) -> Result<usize> {
        Ok(self.data.read().await.len())
    }

    async fn keys(&self) -> Result<Vec<String>> {
        Ok(self.data.read().await.keys().cloned().collect())
    }
}
