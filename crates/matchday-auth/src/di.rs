//! Dependency injection support for matchday-auth

use std::sync::Arc;

use matchday_common::di::{ServiceEntry, ServiceFactory};

use crate::permission::PermissionTable;

inventory::submit! {
    ServiceFactory::new("auth", create_auth_services)
}

fn create_auth_services() -> Vec<ServiceEntry> {
    vec![ServiceEntry::new::<PermissionTable>(Arc::new(
        PermissionTable::new(),
    ))]
}
