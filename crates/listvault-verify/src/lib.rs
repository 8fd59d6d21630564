//! Integrity verification for filter-list documents.
//!
//! Filter lists carry their own checksum in a `! Checksum: <base64>` header
//! line. The checksum is an unpadded base64 MD5 over the document with that
//! line removed and line endings canonicalized (see [`normalize`]).
//!
//! # Example
//!
//! ```
//! use listvault_verify::{Verdict, VerifyPolicy};
//!
//! let doc = "! Checksum: YLcl8QychccNl4gN/oGRsw\na\n";
//! let verdict = VerifyPolicy::strict()
//!     .verify("https://lists.example/a.txt", doc.as_bytes())
//!     .unwrap();
//! assert!(matches!(verdict, Verdict::Verified { .. }));
//! ```

pub use self::document::{SkipReason, Verdict, verify_document};
pub use self::error::{Result, VerificationError};
pub use self::hasher::{Hasher, Md5Hasher};
pub use self::header::{ChecksumHeader, find_checksum_header, strip_checksum_header};
pub use self::normalize::{document_checksum, normalize, strip_padding};
pub use self::policy::{DEFAULT_TRUSTED_ORIGINS, VerifyPolicy};

mod document;
mod error;
mod hasher;
mod header;
mod normalize;
mod policy;
