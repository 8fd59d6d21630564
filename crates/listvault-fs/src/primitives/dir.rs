use crate::{Error, Result};
use std::io;
use std::path::Path;

pub fn ensure_dir(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    std::fs::create_dir_all(path).map_err(|source| Error::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}

/// Remove `path` if it exists and is empty. Returns whether it was removed.
pub fn remove_dir_if_empty(path: impl AsRef<Path>) -> Result<bool> {
    let path = path.as_ref();
    let mut entries = match std::fs::read_dir(path) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(source) => {
            return Err(Error::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    if entries.next().is_some() {
        return Ok(false);
    }

    std::fs::remove_dir(path).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(true)
}

/// Delete the regular files directly under `dir` whose name satisfies
/// `matches`. A missing directory counts as empty. Returns how many were
/// removed.
pub fn remove_files_matching(
    dir: impl AsRef<Path>,
    matches: impl Fn(&str) -> bool,
) -> Result<usize> {
    let dir = dir.as_ref();
    let read_err = |source: io::Error| Error::Read {
        path: dir.to_path_buf(),
        source,
    };

    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
        Err(source) => return Err(read_err(source)),
    };

    let mut removed = 0;
    for entry in entries {
        let entry = entry.map_err(read_err)?;
        let path = entry.path();
        let is_match = entry.file_name().to_str().is_some_and(&matches);
        if !is_match || !entry.file_type().map_err(read_err)?.is_file() {
            continue;
        }
        match std::fs::remove_file(&path) {
            Ok(()) => removed += 1,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(source) => return Err(Error::Write { path, source }),
        }
    }
    Ok(removed)
}
