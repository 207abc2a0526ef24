//! Dependency injection support for matchday-data

use std::sync::Arc;

use matchday_common::di::{ServiceEntry, ServiceFactory};

use crate::backend::MemoryBackend;

inventory::submit! {
    ServiceFactory::new("data", create_data_services)
}

// Registers the offline backend; deployments swap in an HttpBackend after
// loading their BackendConfig.
fn create_data_services() -> Vec<ServiceEntry> {
    vec![ServiceEntry::new::<MemoryBackend>(Arc::new(
        MemoryBackend::new(),
    ))]
}
