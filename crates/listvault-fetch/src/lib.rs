//! Admission-checked, size-bounded HTTPS fetching with retry.
//!
//! # Architecture
//!
//! This crate follows the three-layer pattern:
//! - [`data`] - Policy constants, options and value types
//! - [`core`] - Pure logic: URL admission and retry timing
//! - [`effects`] - I/O: the HTTP transport trait and the staging fetcher
//!
//! # Key Features
//!
//! - **Admission first**: only URLs that pass [`validate_url`] can be fetched
//!   ([`Fetcher`] takes an [`AdmittedUrl`])
//! - **Bounded streaming**: bodies are written to a private temp file in fixed
//!   chunks, and the size ceiling is enforced before each write
//! - **No stale files**: staged files are removed on every failure path and
//!   when the fetch future is dropped; files orphaned by a killed process are
//!   recognized by [`is_staging_file`] so the next run can sweep them
//! - **Explicit retry**: attempts are tagged [`AttemptOutcome`]s consumed by a
//!   bounded loop with computed backoff

pub mod core;
pub mod data;
pub mod effects;
mod error;

pub use core::{AdmittedUrl, RetrySchedule, is_private_ip, retry_delay, validate_url};
pub use data::{
    AttemptOutcome, BACKOFF_MULTIPLIER, CHUNK_SIZE, FetchOptions, MAX_ATTEMPTS, MAX_FILE_SIZE,
    MAX_REDIRECTS, REQUEST_TIMEOUT, RETRY_BASE_DELAY, StagedFile,
};
pub use effects::{BoxStream, ByteStream, Fetcher, HttpClient, is_staging_file};

#[cfg(any(test, feature = "mock"))]
pub use effects::mock;

#[cfg(feature = "reqwest")]
pub use effects::ReqwestClient;

pub use error::{AdmissionError, FetchError, Result, RetryClass, TransportError};
