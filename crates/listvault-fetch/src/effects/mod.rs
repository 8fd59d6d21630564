//! I/O side of fetching: the HTTP transport and the staging fetcher.

mod fetcher;
mod http;
#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use fetcher::{Fetcher, is_staging_file};
pub use http::{BoxStream, ByteStream, HttpClient};
#[cfg(feature = "reqwest")]
pub use http::ReqwestClient;
