//! Client error types

use thiserror::Error;

/// File store error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network failure before a response arrived
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Credential missing or rejected
    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    /// The file (or repository/branch) does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Revision token does not match the store's current revision
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Any other non-success status from the store
    #[error("Remote error ({status}): {message}")]
    Remote { status: u16, message: String },

    /// Response body was not what the content API returns
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Base URL or path cannot form a request URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Content could not be decoded
    #[error("Content error: {0}")]
    Content(#[from] shared::DocumentError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    pub fn is_conflict(&self) -> bool {
        matches!(self, ClientError::Conflict(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::NotFound(_))
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Catalog load failure
#[derive(Debug, Error)]
pub enum LoadError {
    /// No candidate source configured
    #[error("No catalog source configured")]
    NoSources,

    /// Every candidate failed; one entry per attempt
    #[error("Could not load catalog from any source: {}", .attempts.join("; "))]
    Exhausted { attempts: Vec<String> },

    /// A source answered successfully but its body is not a catalog
    #[error("Catalog from {source_label} is invalid: {error}")]
    Decode {
        source_label: String,
        #[source]
        error: shared::DocumentError,
    },
}
