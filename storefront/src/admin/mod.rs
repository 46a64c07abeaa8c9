//! Admin editor
//!
//! Loads the catalog and the sales ledger from the repository, applies
//! one edit in memory, writes both documents back and reloads them.

pub mod commit;
pub mod editor;
pub mod error;
pub mod ops;

pub use commit::{CommitReport, CommittedWrite, FailedWrite, PendingWrite, commit_in_order};
pub use editor::{AdminEditor, DocumentPaths, SaleSummary};
pub use error::{AdminError, AdminResult};
pub use ops::SaleReversal;
