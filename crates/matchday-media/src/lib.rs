//! Media uploads for the federation platform.
//!
//! Covers the contract only: what a valid upload is and how stored objects
//! are addressed. Validation runs before any network call so oversized or
//! unsupported files are rejected without burning bandwidth.

pub mod di;
pub mod error;
pub mod rules;
pub mod store;

pub use error::MediaError;
pub use rules::UploadRules;
pub use store::{FileStore, MemoryFileStore, StoredObject};

/// Result type for media operations
pub type Result<T> = std::result::Result<T, MediaError>;
