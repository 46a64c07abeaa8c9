//! Store configuration

/// Default public API endpoint
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Default raw-content mirror
pub const DEFAULT_RAW_BASE: &str = "https://raw.githubusercontent.com";

/// Where the repository files live and how to reach them
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// API base URL (e.g., "https://api.github.com")
    pub api_base: String,

    /// Raw mirror base URL, used by the catalog fetcher
    pub raw_base: String,

    /// Repository owner
    pub owner: String,

    /// Repository name
    pub repo: String,

    /// Branch reference
    pub branch: String,

    /// Bearer token, trusted as-is
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,
}

impl StoreConfig {
    /// Create a configuration for `owner/repo` on `main`
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            raw_base: DEFAULT_RAW_BASE.to_string(),
            owner: owner.into(),
            repo: repo.into(),
            branch: "main".to_string(),
            token: None,
            timeout: 30,
        }
    }

    /// Set the branch reference
    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = branch.into();
        self
    }

    /// Set the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Point at another API host (GitHub Enterprise, a mock server)
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Point at another raw-content host
    pub fn with_raw_base(mut self, raw_base: impl Into<String>) -> Self {
        self.raw_base = raw_base.into();
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Owner and repository are both set
    pub fn is_configured(&self) -> bool {
        !self.owner.trim().is_empty() && !self.repo.trim().is_empty()
    }

    /// Raw URL of a repository file at the configured branch
    pub fn raw_url(&self, path: &str) -> String {
        format!(
            "{}/{}/{}/{}/{}",
            self.raw_base.trim_end_matches('/'),
            self.owner,
            self.repo,
            self.branch,
            path.trim_start_matches('/')
        )
    }

    /// Create a content API client from this configuration
    pub fn build_client(&self) -> crate::ClientResult<crate::ContentsClient> {
        crate::ContentsClient::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_and_raw_url() {
        let config = StoreConfig::new("acme", "shop")
            .with_branch("gh-pages")
            .with_raw_base("http://127.0.0.1:9000/raw/");
        assert!(config.is_configured());
        assert_eq!(
            config.raw_url("/data/products.json"),
            "http://127.0.0.1:9000/raw/acme/shop/gh-pages/data/products.json"
        );
    }

    #[test]
    fn test_unconfigured() {
        assert!(!StoreConfig::new("", "shop").is_configured());
        assert!(StoreConfig::new("a", "b").token.is_none());
    }
}
