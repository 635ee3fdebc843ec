//! Deleting installation directories.

use crate::error::{LocalError, LocalResult};
use async_trait::async_trait;
use std::path::Path;
use tracing::debug;

/// Deletes a directory tree
#[async_trait]
pub trait Remover: Send + Sync {
    /// Remove `dir` and everything below it
    async fn remove_tree(&self, dir: &Path) -> LocalResult<()>;
}

/// [`Remover`] backed by `tokio::fs::remove_dir_all`
#[derive(Debug, Clone, Copy, Default)]
pub struct DirRemover;

#[async_trait]
impl Remover for DirRemover {
    async fn remove_tree(&self, dir: &Path) -> LocalResult<()> {
        tokio::fs::remove_dir_all(dir)
            .await
            .map_err(|e| LocalError::io(dir, e))?;
        debug!(dir = %dir.display(), "removed");
        Ok(())
    }
}
