use std::future::Future;
use std::pin::Pin;

use bytes::Bytes;
use futures_util::Stream;

use crate::error::TransportError;

/// A boxed stream type for HTTP response bodies.
pub type BoxStream<'a, T> = Pin<Box<dyn Stream<Item = T> + Send + 'a>>;

/// Response body as a stream of chunks.
pub type ByteStream = BoxStream<'static, Result<Bytes, TransportError>>;

/// Asynchronous HTTP client abstraction.
///
/// This trait provides the minimal interface needed for fetching. The
/// implementation owns redirect handling and maps its native failures onto
/// [`TransportError`] so callers can classify them for retry.
///
/// # Implementations
///
/// - [`ReqwestClient`]: Production implementation using `reqwest`
/// - `mock::ScriptedClient` (feature `mock`): in-memory responses for tests
pub trait HttpClient: Send + Sync {
    /// Issue a GET and return the response body as a stream.
    ///
    /// # Errors
    ///
    /// Any non-2xx response is reported as [`TransportError::Status`]
    /// before a body stream is returned. Connection failures, timeouts and
    /// refused redirects map to their respective variants.
    fn get(&self, url: &str) -> impl Future<Output = Result<ByteStream, TransportError>> + Send;
}

impl<C: HttpClient> HttpClient for std::sync::Arc<C> {
    fn get(&self, url: &str) -> impl Future<Output = Result<ByteStream, TransportError>> + Send {
        C::get(&**self, url)
    }
}

#[cfg(feature = "reqwest")]
mod reqwest_impl {
    use super::*;
    use futures_util::TryStreamExt;
    use reqwest::redirect::{Action, Attempt, Policy};

    use crate::core::validate_url;
    use crate::data::{MAX_REDIRECTS, REQUEST_TIMEOUT};

    const USER_AGENT: &str = concat!("listvault/", env!("CARGO_PKG_VERSION"));

    /// Production HTTP client implementation using reqwest.
    ///
    /// Every redirect target is put through the same admission check as the
    /// original URL, so a public host cannot bounce the fetch into a private
    /// network.
    pub struct ReqwestClient {
        client: reqwest::Client,
    }

    impl ReqwestClient {
        pub fn new() -> Result<Self, TransportError> {
            let client = reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .redirect(Policy::custom(admit_redirect))
                .user_agent(USER_AGENT)
                .build()
                .map_err(|e| TransportError::Other(e.to_string()))?;
            Ok(Self { client })
        }
    }

    fn admit_redirect(attempt: Attempt<'_>) -> Action {
        if attempt.previous().len() >= MAX_REDIRECTS {
            return attempt.error(format!("more than {MAX_REDIRECTS} redirects"));
        }
        match validate_url(attempt.url().as_str()) {
            Ok(_) => attempt.follow(),
            Err(e) => attempt.error(e),
        }
    }

    fn map_reqwest_error(e: reqwest::Error) -> TransportError {
        if e.is_timeout() {
            TransportError::Timeout
        } else if e.is_redirect() {
            TransportError::Redirect(e.to_string())
        } else if e.is_connect() {
            TransportError::Connect(e.to_string())
        } else if e.is_body() || e.is_decode() || e.is_request() {
            TransportError::Disconnected(e.to_string())
        } else if let Some(status) = e.status() {
            TransportError::Status(status.as_u16())
        } else {
            TransportError::Other(e.to_string())
        }
    }

    impl HttpClient for ReqwestClient {
        async fn get(&self, url: &str) -> Result<ByteStream, TransportError> {
            let response = self.client.get(url).send().await.map_err(map_reqwest_error)?;

            let status = response.status();
            if !status.is_success() {
                return Err(TransportError::Status(status.as_u16()));
            }

            let stream = response.bytes_stream().map_err(map_reqwest_error);
            Ok(Box::pin(stream))
        }
    }
}

#[cfg(feature = "reqwest")]
pub use reqwest_impl::ReqwestClient;
