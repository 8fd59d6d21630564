use std::path::PathBuf;

use listvault_fs::place_file;
use tempfile::TempPath;

use crate::error::{Result, StoreError};
use crate::identifier::identifier_for;

/// A list that has been committed to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredArtifact {
    pub identifier: String,
    pub source_url: String,
    pub path:       PathBuf,
}

/// Flat content-addressed directory of verified lists.
#[derive(Debug, Clone)]
pub struct ContentStore {
    root: PathBuf,
}

impl ContentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self { Self { root: root.into() } }

    /// Move a verified staging file to its content-addressed path.
    ///
    /// An existing file for the same URL is replaced. On failure the staging
    /// file is removed and nothing is left at the destination.
    pub fn commit(&self, staged: TempPath, url: &str) -> Result<StoredArtifact> {
        let identifier = identifier_for(url);
        let path = self.root.join(&identifier);

        place_file(staged, &path).map_err(|source| StoreError::Commit {
            identifier: identifier.clone(),
            source,
        })?;

        tracing::info!(%url, %identifier, "stored");
        Ok(StoredArtifact {
            identifier,
            source_url: url.to_string(),
            path,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::path::Path;

    use super::*;
    use tempfile::{NamedTempFile, TempDir};

    fn staged_in(dir: &Path, content: &str) -> TempPath {
        let mut file = NamedTempFile::new_in(dir).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.into_temp_path()
    }

    #[test]
    fn test_commit_places_file() {
        let dir = TempDir::new().unwrap();
        let store = ContentStore::new(dir.path());
        let url = "https://example.org/list.txt";

        let artifact = store.commit(staged_in(dir.path(), "||ads.example^\n"), url).unwrap();

        assert_eq!(artifact.identifier, "13e54af0bc7eefaad97e885deebccda4.txt");
        assert_eq!(artifact.source_url, url);
        assert_eq!(artifact.path, dir.path().join("13e54af0bc7eefaad97e885deebccda4.txt"));
        assert_eq!(std::fs::read_to_string(&artifact.path).unwrap(), "||ads.example^\n");
    }

    #[test]
    fn test_recommit_overwrites() {
        let dir = TempDir::new().unwrap();
        let store = ContentStore::new(dir.path());
        let url = "https://example.org/list.txt";

        let first = store.commit(staged_in(dir.path(), "old\n"), url).unwrap();
        let second = store.commit(staged_in(dir.path(), "new\n"), url).unwrap();

        assert_eq!(first, second);
        assert_eq!(std::fs::read_to_string(&second.path).unwrap(), "new\n");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_failed_commit_removes_staged_file() {
        let dir = TempDir::new().unwrap();
        let store = ContentStore::new(dir.path().join("missing"));
        let staged = staged_in(dir.path(), "content");
        let staged_path = staged.to_path_buf();

        let err = store.commit(staged, "https://example.org/list.txt").unwrap_err();

        assert!(matches!(err, StoreError::Commit { .. }));
        assert!(!staged_path.exists());
    }
}
