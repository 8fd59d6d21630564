//! The sync run: catalog, then one concurrent unit of work per source.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use listvault_fetch::{Fetcher, HttpClient, is_staging_file, validate_url};
use listvault_fs::{ensure_dir, remove_dir_if_empty, remove_files_matching};
use listvault_store::{ContentStore, MetadataMap, StoredArtifact};
use listvault_verify::VerifyPolicy;
use tokio::task::JoinSet;
use tracing::Instrument;

use crate::catalog::{SourceDescriptor, fetch_catalog, unique_urls};
use crate::config::SyncConfig;
use crate::error::{PipelineError, SyncError};

/// Final state of one source.
#[derive(Debug)]
pub struct UrlOutcome {
    pub url:    String,
    pub result: Result<StoredArtifact, PipelineError>,
}

impl UrlOutcome {
    pub fn is_success(&self) -> bool { self.result.is_ok() }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub total:     usize,
    pub succeeded: usize,
    pub failed:    usize,
}

impl RunSummary {
    pub fn from_outcomes(outcomes: &[UrlOutcome]) -> Self {
        let succeeded = outcomes.iter().filter(|o| o.is_success()).count();
        Self {
            total: outcomes.len(),
            succeeded,
            failed: outcomes.len() - succeeded,
        }
    }
}

/// What a run produced.
#[derive(Debug)]
pub struct RunReport {
    pub summary:  RunSummary,
    pub outcomes: Vec<UrlOutcome>,
    pub metadata: MetadataMap,
}

/// Fetch the catalog and sync every source in it.
///
/// Only a catalog failure, or an output directory that cannot be written,
/// fails the run. Individual sources fail independently and are counted in
/// the summary.
pub async fn sync<C>(config: &SyncConfig, client: C) -> Result<RunReport, SyncError>
where
    C: HttpClient + 'static,
{
    sync_until(config, client, std::future::pending()).await
}

/// [`sync`], cancelled when `shutdown` resolves.
///
/// On cancellation every in-flight source is aborted and awaited so that its
/// staged file is gone before this returns [`SyncError::Interrupted`].
pub async fn sync_until<C, S>(
    config: &SyncConfig,
    client: C,
    shutdown: S,
) -> Result<RunReport, SyncError>
where
    C: HttpClient + 'static,
    S: Future<Output = ()>,
{
    tokio::pin!(shutdown);
    let sources = tokio::select! {
        sources = fetch_catalog(&client, &config.catalog_url) => sources?,
        () = &mut shutdown => return Err(SyncError::Interrupted),
    };
    run_sources_until(config, client, &sources, shutdown).await
}

/// Sync an already-parsed list of sources.
pub async fn run_sources<C>(
    config: &SyncConfig,
    client: C,
    sources: &[SourceDescriptor],
) -> Result<RunReport, SyncError>
where
    C: HttpClient + 'static,
{
    run_sources_until(config, client, sources, std::future::pending()).await
}

/// [`run_sources`], cancelled when `shutdown` resolves.
pub async fn run_sources_until<C, S>(
    config: &SyncConfig,
    client: C,
    sources: &[SourceDescriptor],
    shutdown: S,
) -> Result<RunReport, SyncError>
where
    C: HttpClient + 'static,
    S: Future<Output = ()>,
{
    let urls = unique_urls(sources);
    if urls.len() < sources.len() {
        tracing::debug!(duplicates = sources.len() - urls.len(), "skipping duplicate sources");
    }

    let staging_dir = config.staging_dir();
    ensure_dir(&config.output_dir)?;
    ensure_dir(&staging_dir)?;
    let swept = remove_files_matching(&staging_dir, is_staging_file)?;
    if swept > 0 {
        tracing::info!(swept, "removed staging files left by an earlier run");
    }

    let unit = Arc::new(Unit {
        fetcher: Fetcher::new(client, &staging_dir).with_options(config.fetch),
        store:   ContentStore::new(&config.output_dir),
        policy:  config.verify.clone(),
    });

    let mut tasks = JoinSet::new();
    let mut pending = HashMap::with_capacity(urls.len());
    for url in urls {
        let span = tracing::info_span!("source", url = %url);
        let unit = Arc::clone(&unit);
        let task_url = url.clone();
        let handle = tasks.spawn(unit.process(task_url).instrument(span));
        pending.insert(handle.id(), url);
    }

    tokio::pin!(shutdown);
    let mut outcomes = Vec::with_capacity(pending.len());
    loop {
        let joined = tokio::select! {
            joined = tasks.join_next_with_id() => joined,
            () = &mut shutdown => {
                tracing::warn!(in_flight = pending.len(), "shutdown requested, cancelling sources");
                tasks.abort_all();
                while tasks.join_next().await.is_some() {}
                release_staging(&staging_dir);
                return Err(SyncError::Interrupted);
            }
        };
        let Some(joined) = joined else { break };

        match joined {
            Ok((id, outcome)) => {
                pending.remove(&id);
                outcomes.push(outcome);
            }
            Err(err) => {
                let url = pending.remove(&err.id()).unwrap_or_default();
                tracing::error!(%url, error = %err, "task did not complete");
                outcomes.push(UrlOutcome {
                    url,
                    result: Err(PipelineError::Task(err.to_string())),
                });
            }
        }
    }

    let metadata: MetadataMap = outcomes
        .iter()
        .filter_map(|o| o.result.as_ref().ok())
        .map(|artifact| (artifact.identifier.clone(), artifact.source_url.clone()))
        .collect();
    metadata.write_snapshot(&config.output_dir)?;

    release_staging(&staging_dir);

    let summary = RunSummary::from_outcomes(&outcomes);
    tracing::info!(
        total = summary.total,
        succeeded = summary.succeeded,
        failed = summary.failed,
        "sync finished"
    );
    if summary.failed > 0 {
        tracing::warn!(failed = summary.failed, "some sources failed");
    }

    Ok(RunReport {
        summary,
        outcomes,
        metadata,
    })
}

fn release_staging(staging_dir: &Path) {
    if let Err(err) = remove_dir_if_empty(staging_dir) {
        tracing::debug!(error = %err, "staging directory left in place");
    }
}

/// Shared state for the per-source tasks.
struct Unit<C: HttpClient> {
    fetcher: Fetcher<C>,
    store:   ContentStore,
    policy:  VerifyPolicy,
}

impl<C: HttpClient + 'static> Unit<C> {
    async fn process(self: Arc<Self>, url: String) -> UrlOutcome {
        let result = Self::fetch_verify_store(&self, &url).await;
        if let Err(err) = &result {
            tracing::error!(error = %err, "source failed");
        }
        UrlOutcome { url, result }
    }

    async fn fetch_verify_store(
        unit: &Arc<Self>,
        url: &str,
    ) -> Result<StoredArtifact, PipelineError> {
        let admitted = validate_url(url)?;
        let staged = unit.fetcher.fetch_with_retry(&admitted).await?;

        let verifier = Arc::clone(unit);
        let owned_url = url.to_string();
        let (staged, verdict) = tokio::task::spawn_blocking(move || {
            let verdict = verifier.policy.verify_file(staged.path(), &owned_url);
            (staged, verdict)
        })
        .await
        .map_err(|err| PipelineError::Task(err.to_string()))?;
        verdict?;

        Ok(unit.store.commit(staged.into_temp_path(), url)?)
    }
}
