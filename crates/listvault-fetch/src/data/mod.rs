//! Configuration and value types for fetching.

pub mod options;
pub mod staged;

pub use options::{
    BACKOFF_MULTIPLIER, CHUNK_SIZE, FetchOptions, MAX_ATTEMPTS, MAX_FILE_SIZE, MAX_REDIRECTS,
    REQUEST_TIMEOUT, RETRY_BASE_DELAY,
};
pub use staged::{AttemptOutcome, StagedFile};
