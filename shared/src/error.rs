//! Error types for the shared crate

use thiserror::Error;

/// Errors raised while decoding or encoding a JSON document
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The document is not valid JSON for the expected model
    #[error("Invalid {kind} document: {source}")]
    Invalid {
        kind: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The in-memory model could not be serialized
    #[error("Failed to serialize {kind} document: {source}")]
    Serialize {
        kind: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// A status string outside `ok`, `out`, `soon`
    #[error("Unknown product status: {0}")]
    UnknownStatus(String),

    /// A language code other than the two supported ones
    #[error("Unknown language: {0}")]
    UnknownLanguage(String),

    /// No sale id is left after the highest one in the ledger
    #[error("No sale id left after {0}")]
    IdsExhausted(String),

    /// Transport content is not valid base64
    #[error("Invalid base64 content: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Decoded content is not valid UTF-8 text
    #[error("Content is not UTF-8 text: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Result type for document operations
pub type DocumentResult<T> = Result<T, DocumentError>;
