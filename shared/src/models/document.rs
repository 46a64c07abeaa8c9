//! JSON document encoding shared by the catalog and the ledger

use crate::error::{DocumentError, DocumentResult};
use serde::{Serialize, de::DeserializeOwned};

pub(crate) fn parse<T: DeserializeOwned>(kind: &'static str, json: &str) -> DocumentResult<T> {
    serde_json::from_str(json).map_err(|source| DocumentError::Invalid { kind, source })
}

/// Pretty JSON, two-space indent, trailing newline
pub(crate) fn render<T: Serialize>(kind: &'static str, value: &T) -> DocumentResult<String> {
    let mut json = serde_json::to_string_pretty(value)
        .map_err(|source| DocumentError::Serialize { kind, source })?;
    json.push('\n');
    Ok(json)
}
