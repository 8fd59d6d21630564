use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::extract::{Rule, decode_list, extract_rules};

const LIST_EXTENSION: &str = "txt";

/// One stored list file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// File name, which is also the store identifier.
    pub name: String,
    pub path: PathBuf,
}

impl SourceFile {
    pub fn rules(&self) -> Result<Vec<Rule>> {
        let bytes = fs::read(&self.path).map_err(|source| Error::Read {
            path: self.path.clone(),
            source,
        })?;
        Ok(extract_rules(&decode_list(&bytes)))
    }
}

/// Every list file in `dir`, sorted by name.
///
/// Only regular `*.txt` files count; hidden entries (including the staging
/// directory) and the metadata file are skipped.
pub fn scan_dir(dir: &Path) -> Result<Vec<SourceFile>> {
    let read_dir_err = |source: std::io::Error| Error::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut sources = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_dir_err)? {
        let entry = entry.map_err(read_dir_err)?;
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if name.starts_with('.') || path.extension().and_then(|e| e.to_str()) != Some(LIST_EXTENSION) {
            continue;
        }
        if !entry.file_type().map_err(read_dir_err)?.is_file() {
            continue;
        }
        sources.push(SourceFile {
            name: name.to_string(),
            path,
        });
    }

    sources.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(sources)
}
