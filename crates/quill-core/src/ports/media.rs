//! Uploaded media storage port.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Storage for uploaded files, addressed by relative path.
#[async_trait]
pub trait MediaStorage: Send + Sync {
    /// Store `bytes` under `<prefix>/YYYY/MM/DD/` for the day of `uploaded_at`
    /// and return the relative path actually used.
    async fn store(
        &self,
        prefix: &str,
        filename: &str,
        bytes: &[u8],
        uploaded_at: DateTime<Utc>,
    ) -> Result<String, MediaError>;

    /// Remove a previously stored file. Missing files are not an error.
    async fn delete(&self, path: &str) -> Result<(), MediaError>;
}

#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("Invalid file name: {0}")]
    InvalidName(String),

    #[error("Storage I/O failed: {0}")]
    Io(String),
}
