//! Role resolution
//!
//! The resolver derives the role fresh from the current session and keeps
//! it current by re-resolving on every auth event. Callers never refresh
//! manually, and no decision survives a sign-in/sign-out boundary.

use std::sync::Arc;

use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tracing::warn;

use crate::permission::{Permission, PermissionTable};
use crate::role::Role;
use crate::session::SessionProvider;

/// Resolve the current role, failing closed.
///
/// Provider errors and absent or expired sessions all resolve to `None`;
/// a lookup failure is logged but never widens access.
pub async fn resolve_role(provider: &dyn SessionProvider) -> Option<Role> {
    match provider.current_session().await {
        Ok(Some(session)) => session.role(),
        Ok(None) => None,
        Err(err) => {
            warn!(error = %err, "session lookup failed, treating as anonymous");
            None
        }
    }
}

/// Live role handle bound to a session provider.
///
/// A background task listens for auth events and recomputes the role on
/// each one; readers observe the latest value through a watch channel.
pub struct RoleResolver {
    table: PermissionTable,
    role_rx: watch::Receiver<Option<Role>>,
    task: JoinHandle<()>,
}

impl RoleResolver {
    /// Resolve the initial role and start following auth events.
    pub async fn spawn(provider: Arc<dyn SessionProvider>) -> Self {
        // Subscribe before the first lookup: an auth event arriving while
        // that lookup is in flight stays buffered and triggers a re-resolve
        // instead of being lost.
        let mut events = provider.subscribe();
        let initial = resolve_role(provider.as_ref()).await;
        let (role_tx, role_rx) = watch::channel(initial);

        let task = tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(_) | Err(broadcast::error::RecvError::Lagged(_)) => {
                        // Lagged still means state changed; re-resolve either way
                        let role = resolve_role(provider.as_ref()).await;
                        if role_tx.send(role).is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        });

        Self {
            table: PermissionTable::new(),
            role_rx,
            task,
        }
    }

    /// The most recently resolved role.
    pub fn role(&self) -> Option<Role> {
        *self.role_rx.borrow()
    }

    /// Watch role changes; useful for reactive UI gating.
    pub fn subscribe(&self) -> watch::Receiver<Option<Role>> {
        self.role_rx.clone()
    }

    /// Capability check against the current role.
    pub fn can(&self, permission: &Permission) -> bool {
        self.table.allows(self.role(), permission)
    }

    pub fn can_any(&self, permissions: &[Permission]) -> bool {
        self.table.allows_any(self.role(), permissions)
    }

    pub fn can_all(&self, permissions: &[Permission]) -> bool {
        self.table.allows_all(self.role(), permissions)
    }
}

impl Drop for RoleResolver {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{AuthEvent, MemorySessionProvider, Session};
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    fn session(role: &str) -> Session {
        Session {
            access_token: "tok".into(),
            user_id: Uuid::new_v4(),
            role: Some(role.into()),
            expires_at: Some(Utc::now() + Duration::hours(1)),
        }
    }

    #[tokio::test]
    async fn resolves_none_when_signed_out() {
        let provider = MemorySessionProvider::new();
        assert_eq!(resolve_role(&provider).await, None);
    }

    #[tokio::test]
    async fn resolves_none_on_lookup_error() {
        let provider = MemorySessionProvider::new();
        provider.sign_in(session("admin")).await;
        provider.set_failing(true);
        assert_eq!(resolve_role(&provider).await, None);
    }

    #[tokio::test]
    async fn follows_sign_in_and_sign_out() {
        let provider = Arc::new(MemorySessionProvider::new());
        let resolver = RoleResolver::spawn(provider.clone()).await;
        let mut changes = resolver.subscribe();
        assert_eq!(resolver.role(), None);

        provider.sign_in(session("editor")).await;
        changes.changed().await.unwrap();
        assert_eq!(resolver.role(), Some(Role::Editor));
        assert!(resolver.can(&Permission::new("news", "create")));

        provider.sign_out().await;
        changes.changed().await.unwrap();
        assert_eq!(resolver.role(), None);
        assert!(!resolver.can(&Permission::new("news", "create")));
    }

    /// Returns a stale admin session from the first lookup, signing out
    /// while that lookup is still in flight. Later lookups see the
    /// signed-out state.
    struct SignOutMidLookup {
        signed_out: std::sync::atomic::AtomicBool,
        events: broadcast::Sender<AuthEvent>,
    }

    impl SignOutMidLookup {
        fn new() -> Self {
            let (events, _) = broadcast::channel(8);
            Self {
                signed_out: std::sync::atomic::AtomicBool::new(false),
                events,
            }
        }
    }

    #[async_trait::async_trait]
    impl SessionProvider for SignOutMidLookup {
        async fn current_session(&self) -> crate::error::Result<Option<Session>> {
            use std::sync::atomic::Ordering;
            if self.signed_out.swap(true, Ordering::SeqCst) {
                return Ok(None);
            }
            let _ = self.events.send(AuthEvent::SignedOut);
            Ok(Some(session("admin")))
        }

        fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
            self.events.subscribe()
        }
    }

    #[tokio::test]
    async fn sign_out_racing_the_initial_lookup_is_not_lost() {
        let provider = Arc::new(SignOutMidLookup::new());
        let resolver = RoleResolver::spawn(provider).await;
        let mut changes = resolver.subscribe();

        // The buffered sign-out event forces a re-resolve; the stale admin
        // role from the first lookup must not survive it.
        changes
            .wait_for(|role| role.is_none())
            .await
            .expect("resolver task dropped the role channel");
        assert_eq!(resolver.role(), None);
        assert!(!resolver.can(&Permission::new("anything", "at-all")));
    }

    #[tokio::test]
    async fn sign_out_never_throws_on_checks() {
        let provider = Arc::new(MemorySessionProvider::new());
        provider.sign_in(session("admin")).await;
        let resolver = RoleResolver::spawn(provider.clone()).await;
        let mut changes = resolver.subscribe();
        assert_eq!(resolver.role(), Some(Role::Admin));

        provider.sign_out().await;
        changes.changed().await.unwrap();
        assert!(!resolver.can(&Permission::new("anything", "at-all")));
        assert!(!resolver.can_any(&[Permission::new("profile", "view")]));
    }
}
