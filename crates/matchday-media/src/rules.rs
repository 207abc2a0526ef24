//! Upload validation rules.
//!
//! Checked client-side before any bytes leave the machine.

use serde::{Deserialize, Serialize};

use crate::error::MediaError;
use crate::Result;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadRules {
    /// Largest accepted file
    #[serde(default = "default_max_size_bytes")]
    pub max_size_bytes: u64,

    /// Accepted file extensions, lowercase, without the dot
    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: Vec<String>,
}

impl Default for UploadRules {
    fn default() -> Self {
        Self {
            max_size_bytes: default_max_size_bytes(),
            allowed_extensions: default_allowed_extensions(),
        }
    }
}

impl UploadRules {
    pub fn with_max_size_bytes(mut self, max_size_bytes: u64) -> Self {
        self.max_size_bytes = max_size_bytes;
        self
    }

    pub fn with_allowed_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_extensions = extensions
            .into_iter()
            .map(|ext| ext.into().to_lowercase())
            .collect();
        self
    }

    /// Validate a candidate upload. Extension matching is case-insensitive;
    /// a file with no extension is never accepted.
    pub fn validate(&self, filename: &str, bytes: &[u8]) -> Result<()> {
        if bytes.is_empty() {
            return Err(MediaError::EmptyFile);
        }
        let size_bytes = bytes.len() as u64;
        if size_bytes > self.max_size_bytes {
            return Err(MediaError::FileTooLarge {
                size_bytes,
                max_bytes: self.max_size_bytes,
            });
        }
        let extension = extension_of(filename);
        let supported = extension
            .as_deref()
            .map(|ext| self.allowed_extensions.iter().any(|allowed| allowed == ext))
            .unwrap_or(false);
        if !supported {
            return Err(MediaError::ExtensionNotSupported {
                extension: extension.unwrap_or_default(),
            });
        }
        Ok(())
    }
}

fn extension_of(filename: &str) -> Option<String> {
    let (stem, extension) = filename.rsplit_once('.')?;
    if stem.is_empty() || extension.is_empty() {
        return None;
    }
    Some(extension.to_lowercase())
}

fn default_max_size_bytes() -> u64 {
    10 * 1024 * 1024
}

fn default_allowed_extensions() -> Vec<String> {
    ["png", "jpg", "jpeg", "gif", "webp", "pdf"]
        .into_iter()
        .map(String::from)
        .collect()
}
