//! Data models
//!
//! Documents stored as JSON files in the catalog repository. Unknown
//! fields are kept in `extra` maps so a read-modify-write never drops
//! data the editor does not understand.

pub mod catalog;
mod document;
pub mod i18n;
pub mod product;
pub mod sale;

// Re-exports
pub use catalog::*;
pub use i18n::*;
pub use product::*;
pub use sale::*;
