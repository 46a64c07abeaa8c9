//! Admin error types

use super::commit::CommitReport;
use thiserror::Error;
use vitrine_client::ClientError;

#[derive(Debug, Error)]
pub enum AdminError {
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    #[error("Sale not found: {0}")]
    SaleNotFound(String),

    #[error("Invalid sale: {0}")]
    InvalidSale(String),

    /// Nothing was written
    #[error("Store error: {0}")]
    Store(#[from] ClientError),

    #[error("Document error: {0}")]
    Document(#[from] shared::DocumentError),

    /// Some writes were committed, at least one was not
    #[error("Partial save: {0}")]
    PartialSave(CommitReport),

    #[error("No pending writes to retry")]
    NothingPending,
}

pub type AdminResult<T> = Result<T, AdminError>;
