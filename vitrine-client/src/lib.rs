//! Vitrine Client - remote file store and catalog fetcher
//!
//! Reads and writes repository files through a GitHub-style content API
//! and loads the public catalog from the first reachable source.

pub mod config;
pub mod error;
pub mod fetcher;
pub mod http;
pub mod memory;
pub mod store;

pub use config::StoreConfig;
pub use error::{ClientError, ClientResult, LoadError};
pub use fetcher::{CatalogFetcher, CatalogSource};
pub use http::ContentsClient;
pub use memory::MemoryFileStore;
pub use store::{FileStore, RemoteFile};
