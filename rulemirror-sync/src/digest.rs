//! SHA-256 content digests used to compare mirrors without keeping every
//! file body around.

use sha2::{Digest, Sha256};

/// Hex digest of `content` with CRLF normalised to LF.
pub fn content_digest(content: &str) -> String {
    let normalized = normalize_line_endings(content);
    let mut hasher = Sha256::new();
    hasher.update(normalized.as_bytes());
    hex::encode(hasher.finalize())
}

/// First 12 hex characters of a digest, for display.
pub fn short(digest: &str) -> &str {
    digest.get(..12).unwrap_or(digest)
}

pub(crate) fn normalize_line_endings(content: &str) -> String {
    content.replace("\r\n", "\n")
}
