//! Filesystem access used while generating lock files
//!
//! All reads and deletes go through [`LocalFs`] so the workflow can be
//! exercised against an in-memory filesystem in tests.

use async_trait::async_trait;
use std::io;
use std::path::Path;

/// File operations needed by the lock file workflow
#[async_trait]
pub trait LocalFs: Send + Sync {
    /// Read a file as UTF-8 text
    async fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Delete a file
    async fn remove_file(&self, path: &Path) -> io::Result<()>;

    /// Read a file, treating any error as absence
    async fn read_optional(&self, path: &Path) -> Option<String> {
        match self.read_to_string(path).await {
            Ok(content) => Some(content),
            Err(e) => {
                tracing::trace!("could not read {}: {}", path.display(), e);
                None
            }
        }
    }
}

/// Filesystem backed by `tokio::fs`
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioFs;

impl TokioFs {
    /// Create a new tokio filesystem
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl LocalFs for TokioFs {
    async fn read_to_string(&self, path: &Path) -> io::Result<String> {
        tokio::fs::read_to_string(path).await
    }

    async fn remove_file(&self, path: &Path) -> io::Result<()> {
        tokio::fs::remove_file(path).await
    }
}
