//! Permission checking logic

use serde::{Deserialize, Serialize};

use crate::role::Role;

/// A `resource:action` capability query. Stateless value, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Permission {
    pub resource: String,
    pub action: String,
}

impl Permission {
    pub fn new(resource: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            action: action.into(),
        }
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.resource, self.action)
    }
}

/// The editor grant set is enumerated explicitly; new resources do not
/// widen it unless added here.
pub const EDITOR_GRANTS: &[(&str, &str)] = &[
    ("news", "create"),
    ("news", "edit"),
    ("news", "delete"),
    ("events", "create"),
    ("events", "edit"),
    ("events", "delete"),
    ("dashboard", "view"),
];

/// Signed-in members may only view their own profile.
pub const USER_GRANTS: &[(&str, &str)] = &[("profile", "view")];

/// Static role-to-permission mapping.
///
/// Admin implicitly holds every permission; the other roles hold exactly
/// their enumerated sets. Anonymous (`None`) holds nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct PermissionTable;

impl PermissionTable {
    pub fn new() -> Self {
        Self
    }

    /// Answer a single capability question.
    pub fn allows(&self, role: Option<Role>, permission: &Permission) -> bool {
        match role {
            Some(Role::Admin) => true,
            Some(Role::Editor) => Self::granted(EDITOR_GRANTS, permission),
            Some(Role::User) => Self::granted(USER_GRANTS, permission),
            None => false,
        }
    }

    /// True if the role holds at least one of the permissions.
    pub fn allows_any(&self, role: Option<Role>, permissions: &[Permission]) -> bool {
        permissions.iter().any(|p| self.allows(role, p))
    }

    /// True if the role holds every permission.
    pub fn allows_all(&self, role: Option<Role>, permissions: &[Permission]) -> bool {
        permissions.iter().all(|p| self.allows(role, p))
    }

    fn granted(grants: &[(&str, &str)], permission: &Permission) -> bool {
        grants
            .iter()
            .any(|(resource, action)| *resource == permission.resource && *action == permission.action)
    }
}

/// Convenience wrapper over a fresh [`PermissionTable`].
pub fn has_permission(role: Option<Role>, permission: &Permission) -> bool {
    PermissionTable.allows(role, permission)
}

/// Quantifier: any of the permissions.
pub fn has_any(role: Option<Role>, permissions: &[Permission]) -> bool {
    PermissionTable.allows_any(role, permissions)
}

/// Quantifier: all of the permissions.
pub fn has_all(role: Option<Role>, permissions: &[Permission]) -> bool {
    PermissionTable.allows_all(role, permissions)
}
