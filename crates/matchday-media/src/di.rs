//! Dependency injection support for matchday-media

use std::sync::Arc;

use matchday_common::di::{ServiceEntry, ServiceFactory};

use crate::store::MemoryFileStore;

inventory::submit! {
    ServiceFactory::new("media", create_media_services)
}

fn create_media_services() -> Vec<ServiceEntry> {
    vec![ServiceEntry::new::<MemoryFileStore>(Arc::new(
        MemoryFileStore::new(),
    ))]
}
