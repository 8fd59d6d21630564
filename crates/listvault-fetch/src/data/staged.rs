use std::path::Path;

use tempfile::TempPath;

use crate::error::{FetchError, RetryClass};

/// A downloaded body sitting in a private temp file.
///
/// The file is deleted when this value is dropped, unless ownership of the
/// path is taken with [`StagedFile::into_temp_path`] and persisted.
#[derive(Debug)]
pub struct StagedFile {
    path: TempPath,
    len:  u64,
}

impl StagedFile {
    pub(crate) fn new(path: TempPath, len: u64) -> Self { Self { path, len } }

    pub fn path(&self) -> &Path { &self.path }

    pub fn len(&self) -> u64 { self.len }

    pub fn is_empty(&self) -> bool { self.len == 0 }

    pub fn into_temp_path(self) -> TempPath { self.path }
}

/// Result of one attempt, tagged for the retry loop.
#[derive(Debug)]
pub enum AttemptOutcome {
    Success(StagedFile),
    Retryable(FetchError),
    Fatal(FetchError),
}

impl From<Result<StagedFile, FetchError>> for AttemptOutcome {
    fn from(result: Result<StagedFile, FetchError>) -> Self {
        match result {
            Ok(staged) => AttemptOutcome::Success(staged),
            Err(err) => match err.retry_class() {
                RetryClass::Retryable => AttemptOutcome::Retryable(err),
                RetryClass::Fatal => AttemptOutcome::Fatal(err),
            },
        }
    }
}
