//! # Matchday Cache
//!
//! In-process read cache for backend tables. Cached reads are keyed by
//! table name and dropped by [`TagCache::invalidate`] after a mutation;
//! the next read re-fetches. Single event loop, no locking beyond the
//! async storage guard.

pub mod cache;
pub mod di;
pub mod error;
pub mod metrics;
pub mod storage;

pub use cache::{CacheConfig, TagCache};
pub use error::CacheError;
pub use metrics::{CacheMetrics, CacheStats};
pub use storage::{CacheEntry, CacheStorage, MemoryStorage};

/// Re-export commonly used Result type
pub type Result<T> = std::result::Result<T, CacheError>;
