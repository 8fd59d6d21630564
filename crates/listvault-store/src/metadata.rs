use std::collections::BTreeMap;
use std::path::Path;

use listvault_fs::{AtomicWriteOptions, atomic_write};
use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};

/// File name of the identifier to URL map inside the store root.
pub const METADATA_FILE: &str = "metadata.json";

/// Identifier to source URL map for one run.
///
/// Built fresh per run and written once as a single snapshot. Keys are kept
/// sorted so the file is byte-stable for the same set of sources.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetadataMap {
    entries: BTreeMap<String, String>,
}

impl MetadataMap {
    pub fn new() -> Self { Self::default() }

    pub fn insert(&mut self, identifier: impl Into<String>, url: impl Into<String>) {
        self.entries.insert(identifier.into(), url.into());
    }

    pub fn get(&self, identifier: &str) -> Option<&str> {
        self.entries.get(identifier).map(String::as_str)
    }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// Serialize as a JSON object with four-space indentation.
    pub fn to_json(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
        self.serialize(&mut ser)?;
        out.push(b'\n');
        Ok(out)
    }

    /// Atomically replace `<root>/metadata.json` with this map.
    pub fn write_snapshot(&self, root: &Path) -> Result<()> {
        let path = root.join(METADATA_FILE);
        atomic_write(&path, &self.to_json()?, AtomicWriteOptions::new().sync(true))
            .map_err(StoreError::Metadata)?;
        tracing::debug!(path = %path.display(), entries = self.len(), "wrote metadata");
        Ok(())
    }

}

impl FromIterator<(String, String)> for MetadataMap {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self { entries: iter.into_iter().collect() }
    }
}
