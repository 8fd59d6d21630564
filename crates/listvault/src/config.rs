use std::path::PathBuf;
use std::time::Duration;

use listvault_fetch::FetchOptions;
use listvault_verify::VerifyPolicy;

/// Brave's published list catalog.
pub const DEFAULT_CATALOG_URL: &str =
    "https://raw.githubusercontent.com/brave/adblock-resources/master/filter_lists/list_catalog.json";

pub const DEFAULT_OUTPUT_DIR: &str = "lists";

/// Per-attempt staging directory, relative to the output root.
pub const STAGING_DIR: &str = ".partial";

/// Limit on the whole catalog request.
pub const CATALOG_TIMEOUT: Duration = Duration::from_secs(60);

/// Everything one sync run needs.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    pub catalog_url: String,
    pub output_dir:  PathBuf,
    pub verify:      VerifyPolicy,
    pub fetch:       FetchOptions,
}

impl SyncConfig {
    pub fn new(catalog_url: impl Into<String>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            catalog_url: catalog_url.into(),
            output_dir:  output_dir.into(),
            verify:      VerifyPolicy::default(),
            fetch:       FetchOptions::default(),
        }
    }

    pub fn with_verify_policy(mut self, policy: VerifyPolicy) -> Self {
        self.verify = policy;
        self
    }

    pub fn with_fetch_options(mut self, options: FetchOptions) -> Self {
        self.fetch = options;
        self
    }

    pub fn staging_dir(&self) -> PathBuf { self.output_dir.join(STAGING_DIR) }
}

impl Default for SyncConfig {
    fn default() -> Self { Self::new(DEFAULT_CATALOG_URL, DEFAULT_OUTPUT_DIR) }
}
