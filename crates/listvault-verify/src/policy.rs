use std::path::Path;

use crate::document::{SkipReason, Verdict, verify_document};
use crate::error::{Result, VerificationError};

/// Origins whose published checksums are known to be unreliable.
pub const DEFAULT_TRUSTED_ORIGINS: &[&str] = &["https://easylist-downloads.adblockplus.org/"];

/// Decides which documents get checksum verification.
///
/// Documents fetched from a trusted origin (a URL prefix) pass without
/// verification; everything else goes through [`verify_document`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyPolicy {
    trusted_origins: Vec<String>,
}

impl Default for VerifyPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_TRUSTED_ORIGINS.iter().copied())
    }
}

impl VerifyPolicy {
    pub fn new<I, S>(trusted_origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            trusted_origins: trusted_origins.into_iter().map(Into::into).collect(),
        }
    }

    /// A policy that verifies every document.
    pub fn strict() -> Self { Self { trusted_origins: Vec::new() } }

    pub fn is_trusted(&self, url: &str) -> bool {
        self.trusted_origins.iter().any(|prefix| url.starts_with(prefix.as_str()))
    }

    pub fn verify(&self, url: &str, bytes: &[u8]) -> Result<Verdict> {
        if self.is_trusted(url) {
            tracing::debug!(url, "trusted origin, skipping checksum");
            return Ok(Verdict::Skipped(SkipReason::TrustedOrigin));
        }

        let verdict = verify_document(bytes).inspect_err(|err| {
            if let VerificationError::Mismatch { expected, actual } = err {
                tracing::error!(url, %expected, %actual, "checksum mismatch");
            }
        })?;
        match &verdict {
            Verdict::Verified { .. } => tracing::info!(url, "checksum is valid"),
            Verdict::Skipped(SkipReason::NoChecksum) => {
                tracing::warn!(url, "no checksum header found")
            }
            Verdict::Skipped(SkipReason::TrustedOrigin) => {}
        }
        Ok(verdict)
    }

    /// Read `path` and verify it as the document fetched from `url`.
    pub fn verify_file(&self, path: &Path, url: &str) -> Result<Verdict> {
        if self.is_trusted(url) {
            return self.verify(url, &[]);
        }
        let bytes = std::fs::read(path)?;
        self.verify(url, &bytes)
    }
}
