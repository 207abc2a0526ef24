//! Error types for the auth crate

use thiserror::Error;

/// Result type for auth operations
pub type Result<T> = std::result::Result<T, AuthError>;

/// Errors that can occur while resolving sessions and roles
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Session lookup failed: {0}")]
    SessionLookup(String),

    #[error("Auth request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Unexpected auth response: HTTP {status}")]
    UnexpectedStatus { status: u16 },

    #[error("Malformed session payload: {0}")]
    MalformedSession(#[from] serde_json::Error),

    #[error("Invalid auth endpoint: {0}")]
    InvalidEndpoint(String),
}
