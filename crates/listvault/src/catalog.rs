use std::collections::HashSet;

use futures_util::StreamExt;
use listvault_fetch::{HttpClient, MAX_FILE_SIZE};
use serde::Deserialize;

use crate::config::CATALOG_TIMEOUT;
use crate::error::CatalogError;

/// One catalog entry. Only the source URLs are read.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogEntry {
    pub sources: Vec<SourceDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SourceDescriptor {
    pub url: String,
}

/// Parse a catalog document into its flat list of sources.
pub fn parse_catalog(bytes: &[u8]) -> Result<Vec<SourceDescriptor>, CatalogError> {
    let entries: Vec<CatalogEntry> = serde_json::from_slice(bytes)?;
    Ok(entries.into_iter().flat_map(|entry| entry.sources).collect())
}

/// Source URLs in catalog order, first occurrence kept.
pub fn unique_urls(sources: &[SourceDescriptor]) -> Vec<String> {
    let mut seen = HashSet::new();
    sources
        .iter()
        .filter(|source| seen.insert(source.url.as_str()))
        .map(|source| source.url.clone())
        .collect()
}

/// GET and parse the catalog.
pub async fn fetch_catalog<C: HttpClient>(
    client: &C,
    url: &str,
) -> Result<Vec<SourceDescriptor>, CatalogError> {
    let body = tokio::time::timeout(CATALOG_TIMEOUT, read_body(client, url, MAX_FILE_SIZE))
        .await
        .map_err(|_| CatalogError::Timeout(CATALOG_TIMEOUT))??;

    let sources = parse_catalog(&body)?;
    tracing::info!(url, sources = sources.len(), "fetched catalog");
    Ok(sources)
}

async fn read_body<C: HttpClient>(client: &C, url: &str, limit: u64) -> Result<Vec<u8>, CatalogError> {
    let mut stream = client.get(url).await?;
    let mut body = Vec::new();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        if (body.len() + chunk.len()) as u64 > limit {
            return Err(CatalogError::TooLarge { limit });
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}
