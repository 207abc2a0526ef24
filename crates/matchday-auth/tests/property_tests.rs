//! Property-based tests for the permission table
//!
//! These verify the role/permission properties that gate every admin
//! section, across arbitrary resource/action inputs.

use matchday_auth::permission::{EDITOR_GRANTS, USER_GRANTS};
use matchday_auth::{has_all, has_any, has_permission, Permission, Role};
use proptest::prelude::*;

fn resource_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z_]{0,15}"
}

fn action_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z_]{0,10}"
}

fn permission_strategy() -> impl Strategy<Value = Permission> {
    (resource_strategy(), action_strategy()).prop_map(|(r, a)| Permission::new(r, a))
}

proptest! {
    /// Admin holds every permission, whatever it names.
    #[test]
    fn admin_always_allowed(permission in permission_strategy()) {
        prop_assert!(has_permission(Some(Role::Admin), &permission));
    }

    /// Anonymous holds no permission, whatever it names.
    #[test]
    fn anonymous_never_allowed(permission in permission_strategy()) {
        prop_assert!(!has_permission(None, &permission));
    }

    /// Editor holds a permission iff it is in the enumerated grant set.
    #[test]
    fn editor_matches_enumerated_set(permission in permission_strategy()) {
        let in_set = EDITOR_GRANTS
            .iter()
            .any(|(r, a)| *r == permission.resource && *a == permission.action);
        prop_assert_eq!(has_permission(Some(Role::Editor), &permission), in_set);
    }

    /// User holds a permission iff it is profile:view.
    #[test]
    fn user_matches_profile_view_only(permission in permission_strategy()) {
        let in_set = USER_GRANTS
            .iter()
            .any(|(r, a)| *r == permission.resource && *a == permission.action);
        prop_assert_eq!(has_permission(Some(Role::User), &permission), in_set);
    }

    /// has_any/has_all agree with the pointwise checks for every role.
    #[test]
    fn quantifiers_agree_with_pointwise_checks(
        permissions in prop::collection::vec(permission_strategy(), 0..6),
        role_idx in 0usize..4,
    ) {
        let role = [Some(Role::Admin), Some(Role::Editor), Some(Role::User), None][role_idx];
        let any = permissions.iter().any(|p| has_permission(role, p));
        let all = permissions.iter().all(|p| has_permission(role, p));
        prop_assert_eq!(has_any(role, &permissions), any);
        prop_assert_eq!(has_all(role, &permissions), all);
    }
}
