//! Content transport encoding
//!
//! The content API ships file bodies as base64, wrapped at 60 columns
//! with `\n`. Revision tokens are content hashes in the style of git blob
//! ids (SHA-256 over `blob <len>\0<bytes>`).

use crate::error::DocumentResult;
use base64::{Engine, engine::general_purpose::STANDARD};
use sha2::{Digest, Sha256};

const LINE_WIDTH: usize = 60;

/// Encode text as single-line base64
pub fn encode_content(content: &str) -> String {
    STANDARD.encode(content.as_bytes())
}

/// Encode text as base64 wrapped at 60 columns
pub fn encode_content_wrapped(content: &str) -> String {
    let encoded = encode_content(content);
    let mut out = String::with_capacity(encoded.len() + encoded.len() / LINE_WIDTH + 1);
    for (i, chunk) in encoded.as_bytes().chunks(LINE_WIDTH).enumerate() {
        if i > 0 {
            out.push('\n');
        }
        // base64 output is ASCII
        out.push_str(&String::from_utf8_lossy(chunk));
    }
    out.push('\n');
    out
}

/// Decode base64 transport content back to text
///
/// Whitespace anywhere in the input is ignored. The bytes must be valid
/// UTF-8; nothing is replaced lossily.
pub fn decode_content(encoded: &str) -> DocumentResult<String> {
    let compact: String = encoded.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = STANDARD.decode(compact.as_bytes())?;
    Ok(String::from_utf8(bytes)?)
}

/// Revision token for a content body
pub fn content_revision(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(format!("blob {}\0", content.len()).as_bytes());
    hasher.update(content);
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_wrapped_non_ascii() {
        let text = "{\n  \"shopName\": \"Café Ñandú ☕\"\n}\n".repeat(5);
        let wrapped = encode_content_wrapped(&text);
        assert!(wrapped.lines().all(|l| l.len() <= LINE_WIDTH));
        assert_eq!(decode_content(&wrapped).unwrap(), text);
    }

    #[test]
    fn test_decode_rejects_invalid_input() {
        assert!(decode_content("@@@").is_err());
        // 0xFF 0xFE is not UTF-8
        let bad = STANDARD.encode([0xFF, 0xFE]);
        let err = decode_content(&bad).unwrap_err();
        assert!(err.to_string().contains("UTF-8"));
    }

    #[test]
    fn test_revision_is_content_addressed() {
        let a = content_revision(b"hello");
        assert_eq!(a, content_revision(b"hello"));
        assert_ne!(a, content_revision(b"hello!"));
        assert_eq!(a.len(), 64);
    }
}
