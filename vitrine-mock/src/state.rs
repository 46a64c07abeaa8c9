//! Mock store state

use shared::encoding;
use std::collections::{HashMap, HashSet};
use tokio::sync::RwLock;

/// A stored file body with its revision
#[derive(Debug, Clone)]
pub struct StoredFile {
    pub sha: String,
    pub content: String,
}

/// A request seen by the raw mirror
#[derive(Debug, Clone)]
pub struct RawRequest {
    pub path: String,
    pub query: Option<String>,
    pub cache_control: Option<String>,
    pub pragma: Option<String>,
}

/// Files of a single repository, keyed by (branch, path)
pub struct MockState {
    owner: String,
    repo: String,
    default_branch: String,
    token: Option<String>,
    files: RwLock<HashMap<(String, String), StoredFile>>,
    rejected: RwLock<HashSet<String>>,
    raw_requests: RwLock<Vec<RawRequest>>,
}

impl MockState {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            default_branch: "main".to_string(),
            token: None,
            files: RwLock::new(HashMap::new()),
            rejected: RwLock::new(HashSet::new()),
            raw_requests: RwLock::new(Vec::new()),
        }
    }

    /// Require `Authorization: Bearer <token>` on API calls
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Seed a file on the default branch
    pub fn with_file(mut self, path: &str, content: &str) -> Self {
        let key = (self.default_branch.clone(), normalize(path));
        self.files.get_mut().insert(key, stored(content));
        self
    }

    pub fn default_branch(&self) -> &str {
        &self.default_branch
    }

    pub fn matches_repo(&self, owner: &str, repo: &str) -> bool {
        self.owner == owner && self.repo == repo
    }

    /// Check an `Authorization` header value
    pub fn authorized(&self, header: Option<&str>) -> bool {
        match &self.token {
            None => true,
            Some(token) => header
                .and_then(|h| h.strip_prefix("Bearer "))
                .is_some_and(|given| given == token),
        }
    }

    pub async fn file(&self, branch: &str, path: &str) -> Option<StoredFile> {
        self.files
            .read()
            .await
            .get(&(branch.to_string(), normalize(path)))
            .cloned()
    }

    /// Content of a file on the default branch
    pub async fn content(&self, path: &str) -> Option<String> {
        self.file(&self.default_branch, path).await.map(|f| f.content)
    }

    /// Store a file, returning its new revision
    pub async fn put(&self, branch: &str, path: &str, content: &str) -> String {
        let file = stored(content);
        let sha = file.sha.clone();
        self.files
            .write()
            .await
            .insert((branch.to_string(), normalize(path)), file);
        sha
    }

    /// Make later writes to `path` fail with a server error
    pub async fn reject_writes(&self, path: &str) {
        self.rejected.write().await.insert(normalize(path));
    }

    pub async fn is_rejected(&self, path: &str) -> bool {
        self.rejected.read().await.contains(&normalize(path))
    }

    pub async fn record_raw(&self, request: RawRequest) {
        self.raw_requests.write().await.push(request);
    }

    pub async fn raw_requests(&self) -> Vec<RawRequest> {
        self.raw_requests.read().await.clone()
    }
}

fn stored(content: &str) -> StoredFile {
    StoredFile {
        sha: encoding::content_revision(content.as_bytes()),
        content: content.to_string(),
    }
}

fn normalize(path: &str) -> String {
    path.trim_matches('/').to_string()
}
