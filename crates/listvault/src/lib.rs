//! Fetch, verify and store third-party filter lists.
//!
//! A run reads a catalog of list URLs and, for each one concurrently:
//! admits the URL, downloads it with bounded retries into a staging file,
//! checks its embedded checksum, and moves it to `<output>/<md5(url)>.txt`.
//! The identifier to URL map is written once at the end as `metadata.json`.
//!
//! ```no_run
//! use listvault::{SyncConfig, sync};
//! use listvault_fetch::ReqwestClient;
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let report = sync(&SyncConfig::default(), ReqwestClient::new()?).await?;
//! println!("{} of {} lists stored", report.summary.succeeded, report.summary.total);
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod config;
mod error;
pub mod pipeline;

pub use catalog::{CatalogEntry, SourceDescriptor, fetch_catalog, parse_catalog, unique_urls};
pub use config::{
    CATALOG_TIMEOUT, DEFAULT_CATALOG_URL, DEFAULT_OUTPUT_DIR, STAGING_DIR, SyncConfig,
};
pub use error::{CatalogError, PipelineError, SyncError};
pub use pipeline::{
    RunReport, RunSummary, UrlOutcome, run_sources, run_sources_until, sync, sync_until,
};
