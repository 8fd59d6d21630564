use std::time::Duration;

/// Calculate the delay before a retry using exponential backoff.
///
/// The delay formula is: `base * multiplier^retry_count`
///
/// # Arguments
///
/// * `retry_count` - The current retry number (0-indexed: 0 = first retry)
/// * `base` - The base delay duration
/// * `multiplier` - The growth factor between consecutive retries
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use listvault_fetch::retry_delay;
///
/// let base = Duration::from_secs(2);
/// assert_eq!(retry_delay(0, base, 2), Duration::from_secs(2));
/// assert_eq!(retry_delay(1, base, 2), Duration::from_secs(4));
/// assert_eq!(retry_delay(2, base, 2), Duration::from_secs(8));
/// ```
pub fn retry_delay(retry_count: u32, base: Duration, multiplier: u32) -> Duration {
    // Use saturating_pow to prevent overflow
    let factor = multiplier.saturating_pow(retry_count);

    // Use saturating_mul to prevent Duration overflow
    base.saturating_mul(factor)
}

/// Bounded retry plan: how many attempts, and how long to wait between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetrySchedule {
    pub max_attempts: u32,
    pub base_delay:   Duration,
    pub multiplier:   u32,
}

impl RetrySchedule {
    /// Delay to wait after failed attempt number `attempt` (1-based), or
    /// `None` if that was the last attempt.
    pub fn delay_after(&self, attempt: u32) -> Option<Duration> {
        if attempt == 0 || attempt >= self.max_attempts {
            return None;
        }
        Some(retry_delay(attempt - 1, self.base_delay, self.multiplier))
    }
}
