//! Pure logic for fetching: URL admission and retry timing.

mod admission;
mod retry;

pub use admission::{ALLOWED_SCHEME, AdmittedUrl, DENIED_HOSTS, is_private_ip, validate_url};
pub use retry::{RetrySchedule, retry_delay};
