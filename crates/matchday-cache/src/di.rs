//! Dependency injection support for matchday-cache

use std::sync::Arc;

use matchday_common::di::{ServiceEntry, ServiceFactory};

use crate::TagCache;

inventory::submit! {
    ServiceFactory::new("cache", create_cache_services)
}

fn create_cache_services() -> Vec<ServiceEntry> {
    vec![ServiceEntry::new::<TagCache>(Arc::new(TagCache::in_memory()))]
}
