//! Port interfaces for the application layer

use async_trait::async_trait;
use std::path::Path;

use crate::application::OutputError;

/// Writes fetched language content into the cache tree
#[async_trait]
pub trait CacheWriter: Send + Sync {
    /// Ensure a directory exists, creating parents as needed
    async fn ensure_directory(&self, path: &Path) -> Result<(), OutputError>;

    /// Write `content` verbatim to `path`, replacing any existing file.
    /// Returns the number of bytes written.
    async fn write_file(&self, path: &Path, content: &[u8]) -> Result<usize, OutputError>;
}
