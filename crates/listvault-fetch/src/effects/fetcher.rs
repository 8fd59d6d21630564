use std::path::PathBuf;

use futures_util::StreamExt;
use tokio::io::AsyncWriteExt;

use crate::core::AdmittedUrl;
use crate::data::{AttemptOutcome, FetchOptions, StagedFile};
use crate::effects::http::HttpClient;
use crate::error::{FetchError, Result, TransportError};

/// Name prefix of per-attempt staging files.
pub const STAGING_PREFIX: &str = ".listvault-";

/// Name suffix of per-attempt staging files.
pub const STAGING_SUFFIX: &str = ".part";

/// Whether `name` is a staging file this crate could have created.
///
/// A process killed mid-download leaves such files behind; callers sweep
/// them before reusing a staging directory.
pub fn is_staging_file(name: &str) -> bool {
    name.len() > STAGING_PREFIX.len() + STAGING_SUFFIX.len()
        && name.starts_with(STAGING_PREFIX)
        && name.ends_with(STAGING_SUFFIX)
}

/// Streams admitted URLs into private staging files.
///
/// Each attempt allocates exactly one temp file under the staging directory.
/// Failure paths delete it before returning; on success the caller owns it
/// through the returned [`StagedFile`].
pub struct Fetcher<C: HttpClient> {
    client:      C,
    staging_dir: PathBuf,
    options:     FetchOptions,
}

impl<C: HttpClient> Fetcher<C> {
    /// Create a new fetcher that stages downloads under `staging_dir`.
    pub fn new(client: C, staging_dir: impl Into<PathBuf>) -> Self {
        Self {
            client,
            staging_dir: staging_dir.into(),
            options: FetchOptions::default(),
        }
    }

    pub fn with_options(mut self, options: FetchOptions) -> Self {
        self.options = options;
        self
    }

    pub fn client(&self) -> &C { &self.client }

    /// One bounded retrieval attempt.
    ///
    /// The whole attempt, connect through last byte, is limited by
    /// [`FetchOptions::request_timeout`]. The body is written in
    /// `chunk_size` pieces and the size ceiling is checked before each write,
    /// so an oversized response is cut off without being buffered.
    pub async fn fetch_once(&self, url: &AdmittedUrl) -> Result<StagedFile> {
        match tokio::time::timeout(self.options.request_timeout, self.download(url.as_str())).await {
            Ok(result) => result,
            Err(_) => Err(TransportError::Timeout.into()),
        }
    }

    async fn download(&self, url: &str) -> Result<StagedFile> {
        let mut stream = self.client.get(url).await?;

        let (file, path) = tempfile::Builder::new()
            .prefix(STAGING_PREFIX)
            .suffix(STAGING_SUFFIX)
            .tempfile_in(&self.staging_dir)
            .map_err(FetchError::Staging)?
            .into_parts();
        let mut file = tokio::fs::File::from_std(file);

        let limit = self.options.max_file_size;
        let mut received = 0u64;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            for piece in chunk.chunks(self.options.chunk_size) {
                received += piece.len() as u64;
                if received > limit {
                    return Err(FetchError::SizeExceeded { limit });
                }
                file.write_all(piece).await.map_err(FetchError::Staging)?;
            }
        }

        file.flush().await.map_err(FetchError::Staging)?;
        file.sync_all().await.map_err(FetchError::Staging)?;
        drop(file);

        Ok(StagedFile::new(path, received))
    }

    /// Fetch with bounded retries and exponential backoff.
    ///
    /// Retryable failures are retried until [`RetrySchedule::max_attempts`]
    /// is reached, sleeping `base * multiplier^n` between attempts, and then
    /// reported as [`FetchError::Exhausted`]. Fatal failures return
    /// immediately.
    ///
    /// [`RetrySchedule::max_attempts`]: crate::RetrySchedule::max_attempts
    pub async fn fetch_with_retry(&self, url: &AdmittedUrl) -> Result<StagedFile> {
        let schedule = self.options.retry;
        let mut attempt = 0;

        loop {
            attempt += 1;
            tracing::debug!(%url, attempt, "fetching");

            let err = match AttemptOutcome::from(self.fetch_once(url).await) {
                AttemptOutcome::Success(staged) => {
                    tracing::info!(%url, bytes = staged.len(), attempt, "downloaded");
                    return Ok(staged);
                }
                AttemptOutcome::Fatal(err) => return Err(err),
                AttemptOutcome::Retryable(err) => err,
            };

            let Some(delay) = schedule.delay_after(attempt) else {
                return Err(FetchError::Exhausted {
                    attempts: attempt,
                    last:     Box::new(err),
                });
            };

            tracing::warn!(
                %url,
                attempt,
                max_attempts = schedule.max_attempts,
                error = %err,
                "attempt failed, retrying in {}s",
                delay.as_secs_f32()
            );
            tokio::time::sleep(delay).await;
        }
    }
}
