//! Canonical form of a list document before hashing.
//!
//! Publishers hash the document with the checksum line removed, carriage
//! returns dropped and the trailing newline run collapsed to a single `\n`.
//! Any deviation here changes which documents verify.

use base64::Engine;
use base64::engine::general_purpose::STANDARD_NO_PAD;

use crate::hasher::{Hasher, Md5Hasher};

/// Drop every `\r`, then collapse a trailing run of `\n` to exactly one.
///
/// A document without a trailing newline is left without one.
pub fn normalize(text: &str) -> String {
    let mut out: String = text.chars().filter(|&c| c != '\r').collect();
    let trimmed_len = out.trim_end_matches('\n').len();
    if trimmed_len < out.len() {
        out.truncate(trimmed_len + 1);
    }
    out
}

/// Base64 MD5 of `normalized`, without `=` padding.
pub fn document_checksum(normalized: &str) -> String {
    let mut hasher = Md5Hasher::new();
    hasher.update(normalized.as_bytes());
    STANDARD_NO_PAD.encode(hasher.finalize())
}

/// A declared checksum token with trailing `=` padding removed.
pub fn strip_padding(token: &str) -> &str { token.trim_end_matches('=') }
