//! Error types for listvault-fetch.

use std::io;
use std::net::IpAddr;

use thiserror::Error;

/// Why a URL was refused before any network access.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdmissionError {
    #[error("invalid URL format: {0}")]
    Malformed(String),

    #[error("invalid scheme: {0}. Only HTTPS is allowed")]
    Scheme(String),

    #[error("URL has no host")]
    MissingHost,

    #[error("access to {0} is not allowed")]
    DeniedHost(String),

    #[error("access to private address {0} is not allowed")]
    PrivateAddress(IpAddr),
}

/// Failure reported by an [`HttpClient`](crate::HttpClient).
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("connection failed: {0}")]
    Connect(String),

    #[error("request timed out")]
    Timeout,

    #[error("connection dropped: {0}")]
    Disconnected(String),

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("redirect refused: {0}")]
    Redirect(String),

    #[error("{0}")]
    Other(String),
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("response exceeds maximum allowed size of {limit} bytes")]
    SizeExceeded { limit: u64 },

    #[error("failed to stage download: {0}")]
    Staging(#[source] io::Error),

    #[error("all {attempts} attempts failed: {last}")]
    Exhausted {
        attempts: u32,
        #[source]
        last:     Box<FetchError>,
    },
}

/// Whether a failed attempt is worth repeating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryClass {
    Retryable,
    Fatal,
}

impl FetchError {
    /// Connection-class failures (connect, disconnect, timeout, non-2xx) are
    /// retryable; oversize bodies, local I/O and refused redirects are not.
    pub fn retry_class(&self) -> RetryClass {
        match self {
            FetchError::Transport(
                TransportError::Connect(_)
                | TransportError::Timeout
                | TransportError::Disconnected(_)
                | TransportError::Status(_),
            ) => RetryClass::Retryable,
            FetchError::Transport(TransportError::Redirect(_) | TransportError::Other(_))
            | FetchError::SizeExceeded { .. }
            | FetchError::Staging(_)
            | FetchError::Exhausted { .. } => RetryClass::Fatal,
        }
    }
}

pub type Result<T> = std::result::Result<T, FetchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_class_errors_are_retryable() {
        for err in [
            TransportError::Connect("refused".into()),
            TransportError::Timeout,
            TransportError::Disconnected("reset".into()),
            TransportError::Status(500),
            TransportError::Status(404),
        ] {
            assert_eq!(FetchError::from(err).retry_class(), RetryClass::Retryable);
        }
    }

    #[test]
    fn terminal_errors_are_fatal() {
        let errors = [
            FetchError::SizeExceeded { limit: 10 },
            FetchError::Staging(io::Error::other("disk full")),
            FetchError::Transport(TransportError::Redirect("private".into())),
            FetchError::Transport(TransportError::Other("builder".into())),
        ];
        for err in errors {
            assert_eq!(err.retry_class(), RetryClass::Fatal, "{err}");
        }
    }
}
