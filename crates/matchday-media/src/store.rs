//! File store contract and the in-memory implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;
use url::Url;

use crate::error::MediaError;
use crate::rules::UploadRules;
use crate::Result;

/// An object that made it into the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub bucket: String,
    pub path: String,
    pub size_bytes: u64,
}

/// Where uploaded files end up. Implementations address objects by
/// bucket-relative path.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Validate and store `bytes` at `path`. The filename part of `path`
    /// drives extension validation.
    async fn upload(&self, bucket: &str, path: &str, bytes: &[u8]) -> Result<StoredObject>;

    /// Public URL serving the object at `path`.
    fn public_url(&self, bucket: &str, path: &str) -> Result<Url>;

    /// Remove stored objects. Paths with no object are skipped, not errors:
    /// removal is used for cleanup after failed multi-file uploads.
    async fn remove(&self, bucket: &str, paths: &[&str]) -> Result<()>;
}

/// In-memory store for tests and offline development.
pub struct MemoryFileStore {
    rules: UploadRules,
    base_url: Url,
    objects: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryFileStore {
    pub fn new() -> Self {
        Self::with_rules(UploadRules::default())
    }

    pub fn with_rules(rules: UploadRules) -> Self {
        // Statically valid, so no Result on the constructor.
        let base_url = Url::parse("memory://media.local/")
            .unwrap_or_else(|_| unreachable!("static base url"));
        Self {
            rules,
            base_url,
            objects: RwLock::new(HashMap::new()),
        }
    }

    pub async fn object_count(&self) -> usize {
        self.objects.read().await.len()
    }

    pub async fn contains(&self, bucket: &str, path: &str) -> bool {
        self.objects.read().await.contains_key(&object_key(bucket, path))
    }
}

impl Default for MemoryFileStore {
    fn default() -> Self {
        Self::new()
    }
}

fn object_key(bucket: &str, path: &str) -> String {
    format!("{bucket}/{path}")
}

#[async_trait]
impl FileStore for MemoryFileStore {
    async fn upload(&self, bucket: &str, path: &str, bytes: &[u8]) -> Result<StoredObject> {
        let filename = path.rsplit('/').next().unwrap_or(path);
        self.rules.validate(filename, bytes)?;
        debug!(bucket, path, size = bytes.len(), "storing object");
        self.objects
            .write()
            .await
            .insert(object_key(bucket, path), bytes.to_vec());
        Ok(StoredObject {
            bucket: bucket.to_string(),
            path: path.to_string(),
            size_bytes: bytes.len() as u64,
        })
    }

    fn public_url(&self, bucket: &str, path: &str) -> Result<Url> {
        self.base_url
            .join(&object_key(bucket, path))
            .map_err(|e| MediaError::store(format!("invalid object path {path}: {e}")))
    }

    async fn remove(&self, bucket: &str, paths: &[&str]) -> Result<()> {
        let mut objects = self.objects.write().await;
        for path in paths {
            objects.remove(&object_key(bucket, path));
        }
        Ok(())
    }
}
