use std::time::Duration;

use crate::core::RetrySchedule;

/// Total attempts per URL, including the first.
pub const MAX_ATTEMPTS: u32 = 3;

/// Delay before the first retry.
pub const RETRY_BASE_DELAY: Duration = Duration::from_secs(2);

/// Growth factor between consecutive retry delays.
pub const BACKOFF_MULTIPLIER: u32 = 2;

/// Hard ceiling on a response body, enforced while streaming.
pub const MAX_FILE_SIZE: u64 = 50 * 1024 * 1024;

/// Bytes written to the staging file per write.
pub const CHUNK_SIZE: usize = 16 * 1024;

/// Budget for one attempt, from connect until the last body byte.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

/// Redirect hops followed before giving up.
pub const MAX_REDIRECTS: usize = 10;

/// Configuration for a [`Fetcher`](crate::Fetcher).
///
/// The defaults are the production policy; the setters exist so tests can
/// shrink limits.
///
/// # Examples
///
/// ```
/// use listvault_fetch::{FetchOptions, MAX_FILE_SIZE};
///
/// let options = FetchOptions::default().max_file_size(1024);
/// assert_eq!(options.max_file_size, 1024);
/// assert_eq!(FetchOptions::default().max_file_size, MAX_FILE_SIZE);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchOptions {
    pub retry:           RetrySchedule,
    pub max_file_size:   u64,
    pub chunk_size:      usize,
    pub request_timeout: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            retry:           RetrySchedule {
                max_attempts: MAX_ATTEMPTS,
                base_delay:   RETRY_BASE_DELAY,
                multiplier:   BACKOFF_MULTIPLIER,
            },
            max_file_size:   MAX_FILE_SIZE,
            chunk_size:      CHUNK_SIZE,
            request_timeout: REQUEST_TIMEOUT,
        }
    }
}

impl FetchOptions {
    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.retry.max_attempts = attempts.max(1);
        self
    }

    pub fn retry_base_delay(mut self, delay: Duration) -> Self {
        self.retry.base_delay = delay;
        self
    }

    pub fn max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = bytes;
        self
    }

    pub fn chunk_size(mut self, bytes: usize) -> Self {
        self.chunk_size = bytes.max(1);
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_policy_constants() {
        let options = FetchOptions::default();
        assert_eq!(options.retry.max_attempts, 3);
        assert_eq!(options.retry.delay_after(1), Some(Duration::from_secs(2)));
        assert_eq!(options.retry.delay_after(2), Some(Duration::from_secs(4)));
        assert_eq!(options.max_file_size, 52_428_800);
        assert_eq!(options.chunk_size, 16_384);
        assert_eq!(options.request_timeout, Duration::from_secs(300));
    }

    #[test]
    fn setters_clamp_degenerate_values() {
        let options = FetchOptions::default().max_attempts(0).chunk_size(0);
        assert_eq!(options.retry.max_attempts, 1);
        assert_eq!(options.chunk_size, 1);
    }
}
