//! Filesystem-based cache writer implementation

use async_trait::async_trait;
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::application::{CacheWriter, OutputError};

/// Cache writer that stores files on the local filesystem
pub struct FileSystemCacheWriter;

impl FileSystemCacheWriter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileSystemCacheWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheWriter for FileSystemCacheWriter {
    async fn ensure_directory(&self, path: &Path) -> Result<(), OutputError> {
        fs::create_dir_all(path)
            .await
            .map_err(|source| OutputError::CreateDirectory {
                path: path.to_path_buf(),
                source,
            })
    }

    async fn write_file(&self, path: &Path, content: &[u8]) -> Result<usize, OutputError> {
        let write_error = |source: std::io::Error| OutputError::WriteFile {
            path: path.to_path_buf(),
            source,
        };

        // `create` truncates, so reruns replace the previous content
        let mut file = fs::File::create(path).await.map_err(write_error)?;

        let mut written = 0;
        while written < content.len() {
            let count = file.write(&content[written..]).await.map_err(write_error)?;
            if count == 0 {
                break;
            }
            written += count;
        }

        file.flush().await.map_err(write_error)?;
        Ok(written)
    }
}
