//! Tag cache implementation

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CacheError;
use crate::metrics::CacheMetrics;
use crate::storage::{CacheEntry, CacheStorage, MemoryStorage};
use crate::Result;

/// Cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Default TTL for cached reads; entries past it count as misses
    pub default_ttl: Option<Duration>,
    /// Enable hit/miss/invalidation counters
    pub enable_metrics: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            default_ttl: Some(Duration::from_secs(300)),
            enable_metrics: true,
        }
    }
}

/// Read cache keyed by invalidation tag.
///
/// Views cache their fetched rows under the owning table's name; the
/// mutation gateway calls [`TagCache::invalidate`] with that name (and any
/// dependent tables) after each successful write.
pub struct TagCache {
    storage: Arc<dyn CacheStorage>,
    config: CacheConfig,
    metrics: CacheMetrics,
}

impl TagCache {
    pub fn new(storage: Arc<dyn CacheStorage>) -> Self {
        Self::with_config(storage, CacheConfig::default())
    }

    pub fn with_config(storage: Arc<dyn CacheStorage>, config: CacheConfig) -> Self {
        Self {
            storage,
            config,
            metrics: CacheMetrics::new(),
        }
    }

    /// Memory-backed cache with default config.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Store a value under a tag, with the config's default TTL.
    pub async fn set<T: Serialize + Clone>(&self, key: &str, value: T) -> Result<()> {
        self.set_with_ttl(key, value, self.config.default_ttl).await
    }

    /// Store a value under a tag with an explicit TTL.
    pub async fn set_with_ttl<T: Serialize + Clone>(
        &self,
        key: &str,
        value: T,
        ttl: Option<Duration>,
    ) -> Result<()> {
        if key.is_empty() {
            return Err(CacheError::InvalidKey {
                key: key.to_string(),
            });
        }
        let entry = CacheEntry::new(value, ttl);
        let json = serde_json::to_value(&entry).map_err(|e| CacheError::Serialization {
            message: e.to_string(),
        })?;
        self.storage.set(key, &json).await?;
        if self.config.enable_metrics {
            self.metrics.set_entry_count(self.storage.len().await?);
        }
        Ok(())
    }

    /// Fetch a cached value; expired entries are dropped and count as
    /// misses.
    pub async fn get<T>(&self, key: &str) -> Result<Option<T>>
    where
        T: for<'de> Deserialize<'de> + Clone,
    {
        if let Some(json) = self.storage.get(key).await? {
            let entry: CacheEntry<T> =
                serde_json::from_value(json).map_err(|e| CacheError::Deserialization {
                    message: e.to_string(),
                })?;
            if !entry.is_expired() {
                if self.config.enable_metrics {
                    self.metrics.record_hit();
                }
                return Ok(Some(entry.data));
            }
            let _ = self.storage.remove(key).await;
        }

        if self.config.enable_metrics {
            self.metrics.record_miss();
        }
        Ok(None)
    }

    /// Drop the cached reads for one tag. Returns whether anything was
    /// cached under it.
    pub async fn invalidate(&self, key: &str) -> Result<bool> {
        let removed = self.storage.remove(key).await?;
        if self.config.enable_metrics {
            self.metrics.record_invalidation();
            self.metrics.set_entry_count(self.storage.len().await?);
        }
        debug!(key, removed, "cache invalidated");
        Ok(removed)
    }

    /// Drop several tags in order.
    pub async fn invalidate_many<I, S>(&self, keys: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for key in keys {
            self.invalidate(key.as_ref()).await?;
        }
        Ok(())
    }

    pub async fn contains(&self, key: &str) -> Result<bool> {
        self.storage.contains(key).await
    }

    pub async fn clear(&self) -> Result<()> {
        self.storage.clear().await?;
        if self.config.enable_metrics {
            self.metrics.set_entry_count(0);
        }
        Ok(())
    }

    pub async fn len(&self) -> Result<usize> {
        self.storage.len().await
    }

    pub async fn keys(&self) -> Result<Vec<String>> {
        self.storage.keys().await
    }

    pub fn stats(&self) -> crate::metrics::CacheStats {
        self.metrics.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_get_invalidate_cycle() {
        let cache = TagCache::in_memory();

        cache.set("news", vec!["headline"]).await.unwrap();
        let rows: Option<Vec<String>> = cache.get("news").await.unwrap();
        assert_eq!(rows, Some(vec!["headline".to_string()]));

        assert!(cache.invalidate("news").await.unwrap());
        let rows: Option<Vec<String>> = cache.get("news").await.unwrap();
        assert_eq!(rows, None);
    }

    #[tokio::test]
    async fn invalidating_absent_tag_is_harmless() {
        let cache = TagCache::in_memory();
        assert!(!cache.invalidate("competitions").await.unwrap());
    }

    #[tokio::test]
    async fn expired_entries_count_as_misses() {
        let cache = TagCache::in_memory();
        cache
            .set_with_ttl("games", 7u32, Some(Duration::from_nanos(1)))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(2)).await;

        let value: Option<u32> = cache.get("games").await.unwrap();
        assert_eq!(value, None);
        assert_eq!(cache.stats().misses, 1);
    }

    #[tokio::test]
    async fn empty_key_is_rejected() {
        let cache = TagCache::in_memory();
        assert!(cache.set("", 1u8).await.is_err());
    }

    #[tokio::test]
    async fn metrics_track_hits_and_invalidations() {
        let cache = TagCache::in_memory();
        cache.set("players", 1u8).await.unwrap();

        let _: Option<u8> = cache.get("players").await.unwrap();
        let _: Option<u8> = cache.get("missing").await.unwrap();
        cache.invalidate("players").await.unwrap();

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.invalidations, 1);
    }

    #[tokio::test]
    async fn invalidate_many_drops_each_tag() {
        let cache = TagCache::in_memory();
        cache.set("games", 1u8).await.unwrap();
        cache.set("competitions", 2u8).await.unwrap();
        cache.set("news", 3u8).await.unwrap();

        cache.invalidate_many(["games", "competitions"]).await.unwrap();
        assert!(!cache.contains("games").await.unwrap());
        assert!(!cache.contains("competitions").await.unwrap());
        assert!(cache.contains("news").await.unwrap());
    }
}
