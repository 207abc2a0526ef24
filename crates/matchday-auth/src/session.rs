//! Session model and providers
//!
//! Sessions are owned by the external auth service; this module holds the
//! transient copy plus the provider seam the resolver subscribes to.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, RwLock};
use url::Url;
use uuid::Uuid;

use crate::error::{AuthError, Result};
use crate::role::Role;

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Transient copy of an authenticated session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Opaque bearer token issued by the auth service
    pub access_token: String,
    pub user_id: Uuid,
    /// Role claim as stored by the backend; parsed lazily so an
    /// unrecognized claim degrades to anonymous instead of erroring
    pub role: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn is_expired(&self) -> bool {
        self.expires_at.map(|at| at <= Utc::now()).unwrap_or(false)
    }

    /// Role carried by this session. Expired sessions carry none.
    pub fn role(&self) -> Option<Role> {
        if self.is_expired() {
            return None;
        }
        self.role.as_deref().and_then(Role::parse)
    }
}

/// Auth state change notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthEvent {
    SignedIn,
    SignedOut,
    TokenRefreshed,
}

/// Seam between the resolver and the hosted auth service.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Fetch the current session, `None` when signed out.
    async fn current_session(&self) -> Result<Option<Session>>;

    /// Subscribe to auth state changes.
    fn subscribe(&self) -> broadcast::Receiver<AuthEvent>;
}

/// In-process provider used by tests and local tooling.
pub struct MemorySessionProvider {
    session: RwLock<Option<Session>>,
    fail_lookups: AtomicBool,
    events: broadcast::Sender<AuthEvent>,
}

impl MemorySessionProvider {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            session: RwLock::new(None),
            fail_lookups: AtomicBool::new(false),
            events,
        }
    }

    pub async fn sign_in(&self, session: Session) {
        *self.session.write().await = Some(session);
        let _ = self.events.send(AuthEvent::SignedIn);
    }

    pub async fn sign_out(&self) {
        *self.session.write().await = None;
        let _ = self.events.send(AuthEvent::SignedOut);
    }

    /// Make subsequent lookups fail, to exercise the fail-closed path.
    pub fn set_failing(&self, failing: bool) {
        self.fail_lookups.store(failing, Ordering::SeqCst);
    }
}

impl Default for MemorySessionProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionProvider for MemorySessionProvider {
    async fn current_session(&self) -> Result<Option<Session>> {
        if self.fail_lookups.load(Ordering::SeqCst) {
            return Err(AuthError::SessionLookup(
                "simulated lookup failure".to_string(),
            ));
        }
        Ok(self.session.read().await.clone())
    }

    fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.events.subscribe()
    }
}

/// Shape of the hosted auth service's user endpoint.
#[derive(Debug, Deserialize)]
struct UserResponse {
    id: Uuid,
    role: Option<String>,
    expires_at: Option<DateTime<Utc>>,
}

/// Provider backed by the hosted auth service's REST endpoint.
///
/// The active bearer token is held here and swapped on sign-in/out; each
/// `current_session` call re-validates it against `GET {auth_url}/user`.
pub struct HttpSessionProvider {
    client: reqwest::Client,
    auth_url: Url,
    api_key: Option<String>,
    token: Arc<RwLock<Option<String>>>,
    events: broadcast::Sender<AuthEvent>,
}

impl HttpSessionProvider {
    pub fn new(auth_url: Url, api_key: Option<String>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            client: reqwest::Client::new(),
            auth_url,
            api_key,
            token: Arc::new(RwLock::new(None)),
            events,
        }
    }

    /// Install or clear the bearer token, emitting the matching event.
    pub async fn set_token(&self, token: Option<String>) {
        let signed_in = token.is_some();
        *self.token.write().await = token;
        let _ = self.events.send(if signed_in {
            AuthEvent::SignedIn
        } else {
            AuthEvent::SignedOut
        });
    }

    fn user_endpoint(&self) -> Result<Url> {
        self.auth_url
            .join("user")
            .map_err(|e| AuthError::InvalidEndpoint(e.to_string()))
    }
}

#[async_trait]
impl SessionProvider for HttpSessionProvider {
    async fn current_session(&self) -> Result<Option<Session>> {
        let token = match self.token.read().await.clone() {
            Some(token) => token,
            None => return Ok(None),
        };

        let mut request = self
            .client
            .get(self.user_endpoint()?)
            .bearer_auth(&token);
        if let Some(key) = &self.api_key {
            request = request.header("apikey", key);
        }

        let response = request.send().await?;
        match response.status() {
            status if status.is_success() => {
                let user: UserResponse = response.json().await?;
                Ok(Some(Session {
                    access_token: token,
                    user_id: user.id,
                    role: user.role,
                    expires_at: user.expires_at,
                }))
            }
            // An invalid or expired token is a signed-out state, not an error
            reqwest::StatusCode::UNAUTHORIZED => Ok(None),
            status => Err(AuthError::UnexpectedStatus {
                status: status.as_u16(),
            }),
        }
    }

    fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.events.subscribe()
    }
}
