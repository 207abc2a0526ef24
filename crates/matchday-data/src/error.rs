//! Error types for the data layer

use std::time::Duration;

use thiserror::Error;

/// Result type for data operations
pub type Result<T> = std::result::Result<T, DataError>;

/// Result type for raw backend calls
pub type BackendResult<T> = std::result::Result<T, BackendError>;

/// Structured error returned by the hosted backend.
#[derive(Debug, Clone, Error)]
#[error("{message}{}", .code.as_ref().map(|c| format!(" (code {c})")).unwrap_or_default())]
pub struct BackendError {
    pub message: String,
    pub code: Option<String>,
}

impl BackendError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
        }
    }

    pub fn with_code(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: Some(code.into()),
        }
    }

    pub fn not_found(table: &str, id: &str) -> Self {
        Self::with_code(format!("no row with id {id} in {table}"), "not_found")
    }

    pub fn is_not_found(&self) -> bool {
        self.code.as_deref() == Some("not_found")
    }

    /// Transient failures worth retrying: network trouble, timeouts,
    /// server errors, rate limiting.
    pub fn is_retryable(&self) -> bool {
        match self.code.as_deref() {
            Some("network") | Some("timeout") | Some("429") => true,
            Some(code) => code
                .parse::<u16>()
                .map(|status| status >= 500)
                .unwrap_or(false),
            None => false,
        }
    }
}

/// Which mutation failed; part of the error surfaced to the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOp {
    Create,
    Update,
    Delete,
}

impl std::fmt::Display for MutationOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MutationOp::Create => write!(f, "create"),
            MutationOp::Update => write!(f, "update"),
            MutationOp::Delete => write!(f, "delete"),
        }
    }
}

/// Errors surfaced by the gateway and read store.
///
/// Mutation failures always carry the table name so notifications can say
/// which entity they concern. None of these are fatal; the UI stays
/// interactive and the caller decides whether to retry.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("{op} on {table} failed: {source}")]
    Mutation {
        table: &'static str,
        op: MutationOp,
        #[source]
        source: BackendError,
    },

    #[error("read of {table} failed: {source}")]
    Read {
        table: &'static str,
        #[source]
        source: BackendError,
    },

    #[error("request to {table} timed out after {after:?}")]
    Timeout {
        table: &'static str,
        after: Duration,
    },

    #[error("request to {table} was cancelled")]
    Cancelled { table: &'static str },

    #[error("payload encoding failed: {0}")]
    Encoding(#[from] serde_json::Error),
}

impl DataError {
    /// Table the failing request was aimed at, when known.
    pub fn table(&self) -> Option<&'static str> {
        match self {
            DataError::Mutation { table, .. }
            | DataError::Read { table, .. }
            | DataError::Timeout { table, .. }
            | DataError::Cancelled { table } => Some(table),
            _ => None,
        }
    }
}
