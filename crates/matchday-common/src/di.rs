//! Service registration for auto-discovery across crates.
//!
//! Feature crates submit a [`ServiceFactory`] through `inventory::submit!`
//! and return their services as [`ServiceEntry`] items. A composition root
//! calls [`collect_all_services`] once at startup and wires the entries into
//! whatever container it uses.
//!
//! These types live here because matchday-common depends on no other
//! matchday crate, so every feature crate can reach them without cycles.
//!
//! ```rust,ignore
//! use matchday_common::di::{ServiceEntry, ServiceFactory};
//! use std::sync::Arc;
//!
//! inventory::submit! {
//!     ServiceFactory::new("cache", create_cache_services)
//! }
//!
//! fn create_cache_services() -> Vec<ServiceEntry> {
//!     vec![ServiceEntry::new::<TagCache>(Arc::new(TagCache::in_memory()))]
//! }
//! ```

use std::any::{Any, TypeId};
use std::sync::Arc;

use tracing::debug;

/// A type-erased service instance produced by a factory.
pub struct ServiceEntry {
    /// Registration key.
    pub type_id: TypeId,
    /// Human-readable type name for diagnostics.
    pub type_name: &'static str,
    /// The instance itself.
    pub instance: Arc<dyn Any + Send + Sync>,
}

impl ServiceEntry {
    /// Wrap a concrete service instance.
    pub fn new<T: Send + Sync + 'static>(instance: Arc<T>) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            instance: instance as Arc<dyn Any + Send + Sync>,
        }
    }
}

impl std::fmt::Debug for ServiceEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceEntry")
            .field("type_name", &self.type_name)
            .finish()
    }
}

/// A named group of services contributed by one crate.
pub struct ServiceFactory {
    /// Group name, e.g. "auth" or "cache".
    pub name: &'static str,
    /// Creates the group's services.
    pub factory_fn: fn() -> Vec<ServiceEntry>,
    /// Registration order; lower runs earlier.
    pub priority: u32,
}

// SAFETY: holds only a &'static str, a fn pointer, and a u32, all Sync.
unsafe impl Sync for ServiceFactory {}

impl ServiceFactory {
    /// Create a factory with the default priority (100).
    pub const fn new(name: &'static str, factory_fn: fn() -> Vec<ServiceEntry>) -> Self {
        Self {
            name,
            factory_fn,
            priority: 100,
        }
    }

    /// Create a factory that registers at a specific priority.
    pub const fn with_priority(
        name: &'static str,
        factory_fn: fn() -> Vec<ServiceEntry>,
        priority: u32,
    ) -> Self {
        Self {
            name,
            factory_fn,
            priority,
        }
    }
}

inventory::collect!(ServiceFactory);

/// Run every discovered factory, in priority order, and collect the entries.
pub fn collect_all_services() -> Vec<ServiceEntry> {
    let mut factories: Vec<&ServiceFactory> = inventory::iter::<ServiceFactory>().collect();
    factories.sort_by_key(|f| f.priority);

    let mut services = Vec::new();
    for factory in factories {
        let entries = (factory.factory_fn)();
        debug!(group = factory.name, count = entries.len(), "registered services");
        services.extend(entries);
    }
    services
}

/// Names of every discovered factory, for diagnostics and tests.
pub fn list_discovered_factories() -> Vec<&'static str> {
    inventory::iter::<ServiceFactory>().map(|f| f.name).collect()
}
