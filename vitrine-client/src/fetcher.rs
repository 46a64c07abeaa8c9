//! Catalog fetcher
//!
//! Tries each configured source in order and returns the first catalog
//! that comes back with a success status. Sources are attempted one at a
//! time; nothing runs in parallel and nothing is retried.

use crate::{ClientResult, LoadError, StoreConfig};
use reqwest::{Client, header};
use shared::Catalog;
use std::path::PathBuf;

/// Where a catalog document can be loaded from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    /// HTTP(S) location, requested with cache-defeating parameters
    Url(String),
    /// Bundled copy on the local filesystem
    File(PathBuf),
}

impl CatalogSource {
    /// `http://` / `https://` become URLs, anything else a file path
    pub fn parse(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            CatalogSource::Url(location.to_string())
        } else {
            CatalogSource::File(PathBuf::from(location))
        }
    }

    pub fn label(&self) -> String {
        match self {
            CatalogSource::Url(url) => url.clone(),
            CatalogSource::File(path) => path.display().to_string(),
        }
    }
}

/// Loads the public catalog from an ordered list of sources
#[derive(Debug, Clone)]
pub struct CatalogFetcher {
    client: Client,
    sources: Vec<CatalogSource>,
}

impl CatalogFetcher {
    pub fn new(sources: Vec<CatalogSource>, timeout_secs: u64) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self { client, sources })
    }

    /// Live raw mirror of `catalog_path` first (when the store is
    /// configured), then the bundled copy
    pub fn for_store(
        config: &StoreConfig,
        catalog_path: &str,
        bundled: Option<CatalogSource>,
    ) -> ClientResult<Self> {
        let mut sources = Vec::with_capacity(2);
        if config.is_configured() {
            sources.push(CatalogSource::Url(config.raw_url(catalog_path)));
        }
        sources.extend(bundled);
        Self::new(sources, config.timeout)
    }

    pub fn sources(&self) -> &[CatalogSource] {
        &self.sources
    }

    /// Load the catalog from the first source that answers
    pub async fn fetch(&self) -> Result<Catalog, LoadError> {
        if self.sources.is_empty() {
            return Err(LoadError::NoSources);
        }

        let mut attempts = Vec::with_capacity(self.sources.len());
        for source in &self.sources {
            let label = source.label();
            match self.fetch_body(source).await {
                Ok(body) => {
                    tracing::info!(source = %label, "Catalog loaded");
                    return Catalog::from_json(&body).map_err(|error| LoadError::Decode {
                        source_label: label,
                        error,
                    });
                }
                Err(reason) => {
                    tracing::warn!(source = %label, %reason, "Catalog source failed");
                    attempts.push(format!("{}: {}", label, reason));
                }
            }
        }

        Err(LoadError::Exhausted { attempts })
    }

    /// Raw body of one source, or a human-readable failure reason
    async fn fetch_body(&self, source: &CatalogSource) -> Result<String, String> {
        match source {
            CatalogSource::Url(url) => {
                let stamp = chrono::Utc::now().timestamp_millis();
                let response = self
                    .client
                    .get(url)
                    .query(&[("t", stamp)])
                    .header(header::CACHE_CONTROL, "no-cache")
                    .header(header::PRAGMA, "no-cache")
                    .send()
                    .await
                    .map_err(|e| e.to_string())?;

                let status = response.status();
                if !status.is_success() {
                    return Err(format!("HTTP {}", status.as_u16()));
                }
                response.text().await.map_err(|e| e.to_string())
            }
            CatalogSource::File(path) => tokio::fs::read_to_string(path)
                .await
                .map_err(|e| e.to_string()),
        }
    }
}
