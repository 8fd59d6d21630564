use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use listvault::{DEFAULT_CATALOG_URL, DEFAULT_OUTPUT_DIR, SyncConfig, sync_until};
use listvault_fetch::ReqwestClient;
use listvault_verify::VerifyPolicy;

#[derive(Debug, Clone, clap::Args)]
pub struct SyncArg {
    /// URL of the list catalog
    #[arg(long, env = "LISTVAULT_CATALOG", default_value = DEFAULT_CATALOG_URL)]
    pub catalog: String,

    /// Directory the verified lists are stored in
    #[arg(long, env = "LISTVAULT_OUTPUT_DIR", default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// URL prefix whose lists skip checksum verification (repeatable; replaces the defaults)
    #[arg(long = "trusted-origin", value_name = "PREFIX")]
    pub trusted_origins: Vec<String>,
}

impl SyncArg {
    pub fn config(&self) -> SyncConfig {
        let config = SyncConfig::new(&self.catalog, &self.output_dir);
        if self.trusted_origins.is_empty() {
            config
        } else {
            config.with_verify_policy(VerifyPolicy::new(self.trusted_origins.iter().cloned()))
        }
    }

    pub async fn run(self) -> anyhow::Result<ExitCode> {
        let client = ReqwestClient::new().context("failed to build HTTP client")?;
        let config = self.config();
        sync_until(&config, client, shutdown_signal())
            .await
            .with_context(|| format!("sync from {} failed", config.catalog_url))?;
        Ok(ExitCode::SUCCESS)
    }
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %err, "cannot listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::warn!(error = %err, "cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received Ctrl-C"),
        () = terminate => tracing::info!("received SIGTERM"),
    }
}
