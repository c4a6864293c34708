//! SHA-256 content fingerprints
//!
//! A fingerprint is the lowercase hex SHA-256 of the UTF-8 bytes of a string.
//! Two articles with equal fingerprints are treated as identical, so this
//! must stay a cryptographic hash.

use sha2::{Digest, Sha256};

/// Length of a hex-encoded SHA-256 digest
pub const CHECKSUM_LEN: usize = 64;

/// Compute the SHA-256 fingerprint of string content.
pub fn compute_content_checksum(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Whether `value` looks like a fingerprint produced by this module.
pub fn is_valid_checksum(value: &str) -> bool {
    value.len() == CHECKSUM_LEN
        && value
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}
