use crate::admin::DocumentPaths;
use crate::session::{SessionPrefs, SessionStore};
use vitrine_client::config::{DEFAULT_API_BASE, DEFAULT_RAW_BASE};
use vitrine_client::{CatalogFetcher, CatalogSource, ClientResult, StoreConfig};

/// Storefront configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | VITRINE_WORK_DIR | .vitrine | Session file and logs |
/// | GITHUB_API_BASE | https://api.github.com | Content API host |
/// | RAW_BASE | https://raw.githubusercontent.com | Live catalog mirror |
/// | GITHUB_OWNER | (empty) | Repository owner |
/// | GITHUB_REPO | (empty) | Repository name |
/// | GITHUB_BRANCH | main | Branch reference |
/// | GITHUB_TOKEN | (none) | Bearer token for admin writes |
/// | CATALOG_PATH | data/products.json | Catalog file in the repository |
/// | SALES_PATH | data/sales.json | Sales ledger file in the repository |
/// | BUNDLED_CATALOG | data/products.json | Local fallback copy (path or URL) |
/// | REQUEST_TIMEOUT_SECS | 30 | HTTP timeout |
/// | LOG_LEVEL | info | Log level |
/// | LOG_DIR | (none) | Log to daily files in this directory |
///
/// Owner, repository and branch saved in the session file take
/// precedence over the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub work_dir: String,
    pub api_base: String,
    pub raw_base: String,
    pub owner: String,
    pub repo: String,
    pub branch: String,
    pub token: Option<String>,
    pub catalog_path: String,
    pub sales_path: String,
    /// Empty disables the bundled fallback
    pub bundled_catalog: String,
    pub request_timeout_secs: u64,
    pub log_level: String,
    pub log_dir: Option<String>,
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.into())
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            work_dir: env_or("VITRINE_WORK_DIR", ".vitrine"),
            api_base: env_or("GITHUB_API_BASE", DEFAULT_API_BASE),
            raw_base: env_or("RAW_BASE", DEFAULT_RAW_BASE),
            owner: env_or("GITHUB_OWNER", ""),
            repo: env_or("GITHUB_REPO", ""),
            branch: env_or("GITHUB_BRANCH", "main"),
            token: std::env::var("GITHUB_TOKEN").ok().filter(|t| !t.is_empty()),
            catalog_path: env_or("CATALOG_PATH", "data/products.json"),
            sales_path: env_or("SALES_PATH", "data/sales.json"),
            bundled_catalog: env_or("BUNDLED_CATALOG", "data/products.json"),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            log_level: env_or("LOG_LEVEL", "info"),
            log_dir: std::env::var("LOG_DIR").ok(),
        }
    }

    /// Repository coordinates, session values first
    pub fn store_config(&self, prefs: &SessionPrefs) -> StoreConfig {
        let owner = prefs.owner.clone().unwrap_or_else(|| self.owner.clone());
        let repo = prefs.repo.clone().unwrap_or_else(|| self.repo.clone());
        let branch = prefs.branch.clone().unwrap_or_else(|| self.branch.clone());

        let mut config = StoreConfig::new(owner, repo)
            .with_branch(branch)
            .with_api_base(&self.api_base)
            .with_raw_base(&self.raw_base)
            .with_timeout(self.request_timeout_secs);
        if let Some(token) = &self.token {
            config = config.with_token(token);
        }
        config
    }

    pub fn document_paths(&self) -> DocumentPaths {
        DocumentPaths::new(&self.catalog_path, &self.sales_path)
    }

    pub fn session_store(&self) -> SessionStore {
        SessionStore::new(&self.work_dir, "session.json")
    }

    /// Live mirror first, then the bundled copy
    pub fn catalog_fetcher(&self, prefs: &SessionPrefs) -> ClientResult<CatalogFetcher> {
        let bundled = Some(self.bundled_catalog.trim())
            .filter(|b| !b.is_empty())
            .map(CatalogSource::parse);
        CatalogFetcher::for_store(&self.store_config(prefs), &self.catalog_path, bundled)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            work_dir: "/tmp/vitrine".into(),
            api_base: DEFAULT_API_BASE.into(),
            raw_base: DEFAULT_RAW_BASE.into(),
            owner: "env-owner".into(),
            repo: "env-repo".into(),
            branch: "main".into(),
            token: Some("t0k".into()),
            catalog_path: "data/products.json".into(),
            sales_path: "data/sales.json".into(),
            bundled_catalog: "public/products.json".into(),
            request_timeout_secs: 10,
            log_level: "info".into(),
            log_dir: None,
        }
    }

    #[test]
    fn test_session_overrides_environment() {
        let prefs = SessionPrefs {
            owner: Some("me".into()),
            branch: Some("pages".into()),
            ..Default::default()
        };
        let store = config().store_config(&prefs);
        assert_eq!(store.owner, "me");
        assert_eq!(store.repo, "env-repo");
        assert_eq!(store.branch, "pages");
        assert_eq!(store.token.as_deref(), Some("t0k"));
        assert_eq!(store.timeout, 10);
    }

    #[test]
    fn test_fetcher_sources() {
        let fetcher = config().catalog_fetcher(&SessionPrefs::default()).unwrap();
        assert_eq!(fetcher.sources().len(), 2);
        assert_eq!(
            fetcher.sources()[1],
            CatalogSource::File("public/products.json".into())
        );

        let mut no_bundle = config();
        no_bundle.bundled_catalog = String::new();
        let fetcher = no_bundle.catalog_fetcher(&SessionPrefs::default()).unwrap();
        assert_eq!(fetcher.sources().len(), 1);
    }
}
