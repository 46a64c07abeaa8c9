//! Shared types for Vitrine
//!
//! Catalog and sales-ledger documents used by both the storefront view
//! and the admin editor, plus the error type for (de)serializing them.

pub mod encoding;
pub mod error;
pub mod models;

// Re-exports
pub use error::{DocumentError, DocumentResult};
pub use models::{
    Catalog, Language, LocalizedText, Product, ProductStatus, Sale, SaleItem, SalesLedger,
};
pub use serde::{Deserialize, Serialize};
