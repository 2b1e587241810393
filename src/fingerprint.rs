//! Fingerprints for compiled prompt text using BLAKE3
//!
//! A fingerprint is the first [`FINGERPRINT_BYTES`] bytes of the BLAKE3
//! digest of the text's UTF-8 bytes, rendered as lowercase hex. It is a
//! change-detection aid, not a commitment.

use crate::types::Hash;
use blake3::Hasher;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Digest bytes kept in a fingerprint (16 hex characters)
pub const FINGERPRINT_BYTES: usize = 8;

/// Short, fixed-width hex fingerprint
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Fingerprint {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Full BLAKE3 digest of text
pub fn compute_text_hash(text: &str) -> Hash {
    let mut hasher = Hasher::new();
    hasher.update(text.as_bytes());
    *hasher.finalize().as_bytes()
}

/// Fingerprint of text
pub fn fingerprint(text: &str) -> Fingerprint {
    let hash = compute_text_hash(text);
    Fingerprint(hex::encode(&hash[..FINGERPRINT_BYTES]))
}
