//! In-memory file store
//!
//! Same contract as the HTTP client, used to exercise editors without a
//! network. Clones share the same files.

use crate::{ClientError, ClientResult, FileStore, RemoteFile};
use async_trait::async_trait;
use shared::encoding;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Inner {
    files: HashMap<String, RemoteFile>,
    rejected: HashSet<String>,
    commits: Vec<String>,
}

/// Revisioned store held in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryFileStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryFileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file, returning its revision
    pub async fn insert(&self, path: &str, content: &str) -> String {
        let revision = encoding::content_revision(content.as_bytes());
        self.inner.write().await.files.insert(
            normalize(path),
            RemoteFile {
                revision: revision.clone(),
                content: content.to_string(),
            },
        );
        revision
    }

    /// Current content of a file, if any
    pub async fn content(&self, path: &str) -> Option<String> {
        self.inner
            .read()
            .await
            .files
            .get(&normalize(path))
            .map(|f| f.content.clone())
    }

    /// Make every later write to `path` fail with a server error
    pub async fn reject_writes(&self, path: &str) {
        self.inner.write().await.rejected.insert(normalize(path));
    }

    /// Accept writes to `path` again
    pub async fn accept_writes(&self, path: &str) {
        self.inner.write().await.rejected.remove(&normalize(path));
    }

    /// Commit messages in the order they were accepted
    pub async fn commits(&self) -> Vec<String> {
        self.inner.read().await.commits.clone()
    }
}

fn normalize(path: &str) -> String {
    path.trim_matches('/').to_string()
}

#[async_trait]
impl FileStore for MemoryFileStore {
    async fn read_file(&self, path: &str) -> ClientResult<RemoteFile> {
        self.inner
            .read()
            .await
            .files
            .get(&normalize(path))
            .cloned()
            .ok_or_else(|| ClientError::NotFound(format!("{}: Not Found", path)))
    }

    async fn write_file(
        &self,
        path: &str,
        content: &str,
        message: &str,
        revision: Option<&str>,
    ) -> ClientResult<String> {
        let key = normalize(path);
        let mut inner = self.inner.write().await;

        if inner.rejected.contains(&key) {
            return Err(ClientError::Remote {
                status: 500,
                message: format!("write to {} rejected", path),
            });
        }

        let current = inner.files.get(&key).map(|f| f.revision.as_str());
        match (current, revision) {
            (None, None) => {}
            (Some(current), Some(given)) if current == given => {}
            (Some(current), given) => {
                return Err(ClientError::Conflict(format!(
                    "{} is at {} but {} was given",
                    path,
                    current,
                    given.unwrap_or("no revision")
                )));
            }
            (None, Some(given)) => {
                return Err(ClientError::Conflict(format!(
                    "{} does not exist at {}",
                    path, given
                )));
            }
        }

        let revision = encoding::content_revision(content.as_bytes());
        inner.files.insert(
            key,
            RemoteFile {
                revision: revision.clone(),
                content: content.to_string(),
            },
        );
        inner.commits.push(message.to_string());
        Ok(revision)
    }
}
