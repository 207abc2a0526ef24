//! Error types for media uploads

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum MediaError {
    #[error("file is {size_bytes} bytes, limit is {max_bytes}")]
    FileTooLarge { size_bytes: u64, max_bytes: u64 },

    #[error("extension {extension:?} is not supported")]
    ExtensionNotSupported { extension: String },

    #[error("file is empty")]
    EmptyFile,

    #[error("store operation failed: {message}")]
    Store { message: String },

    #[error("no object stored at {path}")]
    NotFound { path: String },
}

impl MediaError {
    pub fn store(message: impl Into<String>) -> Self {
        MediaError::Store {
            message: message.into(),
        }
    }
}
