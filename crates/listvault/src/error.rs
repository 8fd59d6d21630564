use std::time::Duration;

use listvault_fetch::{AdmissionError, FetchError, TransportError};
use listvault_store::StoreError;
use listvault_verify::VerificationError;

/// The catalog could not be retrieved or understood. Fatal for a run.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog request failed: {0}")]
    Transport(#[from] TransportError),

    #[error("catalog request timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("catalog exceeds {limit} bytes")]
    TooLarge { limit: u64 },

    #[error("invalid catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Why a single source failed. Never aborts the run.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("rejected: {0}")]
    Admission(#[from] AdmissionError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("integrity check failed: {0}")]
    Integrity(#[from] VerificationError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("task failed: {0}")]
    Task(String),
}

/// Run-level failure.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("failed to prepare output directory: {0}")]
    Output(#[from] listvault_fs::Error),

    #[error(transparent)]
    Metadata(#[from] StoreError),

    #[error("interrupted before all sources finished")]
    Interrupted,
}
