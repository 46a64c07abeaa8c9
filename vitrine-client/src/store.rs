//! File store contract

use crate::ClientResult;
use async_trait::async_trait;

/// A file as read from the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFile {
    /// Revision token to pass to the next write
    pub revision: String,
    /// Decoded text content
    pub content: String,
}

/// Read/write access to text files in a revisioned store
///
/// Each call stands alone: writing two files is two independent commits,
/// and a failure on the second leaves the first in place.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Fetch current content and revision of `path`
    async fn read_file(&self, path: &str) -> ClientResult<RemoteFile>;

    /// Replace the content of `path`, returning the new revision
    ///
    /// `revision: None` creates the file. With `Some`, the store must still
    /// be at that revision or the write fails with `ClientError::Conflict`
    /// and nothing changes.
    async fn write_file(
        &self,
        path: &str,
        content: &str,
        message: &str,
        revision: Option<&str>,
    ) -> ClientResult<String>;
}
