use crate::{Error, Result};
use std::fs::File;
use std::io;
use std::path::Path;
use tempfile::{PathPersistError, TempPath};

/// Move a staged temp file to `dest`, replacing any existing file.
///
/// Consumes the [`TempPath`]: on every failure path the staged file is
/// deleted when the guard drops, so nothing is left behind.
pub fn place_file(staged: TempPath, dest: impl AsRef<Path>) -> Result<()> {
    let dest = dest.as_ref();

    match staged.persist(dest) {
        Ok(()) => Ok(()),
        Err(PathPersistError { error, path }) if is_cross_device(&error) => {
            tracing::debug!(from = %path.display(), to = %dest.display(), "cross-device move, copying");
            copy_into_place(&path, dest)
        }
        Err(PathPersistError { error, path }) => Err(Error::Move {
            from:   path.to_path_buf(),
            to:     dest.to_path_buf(),
            source: error,
        }),
    }
}

fn is_cross_device(e: &io::Error) -> bool {
    e.raw_os_error() == Some(18) || e.kind() == io::ErrorKind::CrossesDevices
}

fn copy_into_place(src: &Path, dest: &Path) -> Result<()> {
    let parent = dest
        .parent()
        .ok_or_else(|| Error::NoParent(dest.to_path_buf()))?;
    let move_err = |source: io::Error| Error::Move {
        from: src.to_path_buf(),
        to: dest.to_path_buf(),
        source,
    };

    let mut reader = File::open(src).map_err(move_err)?;
    let mut tmp = tempfile::NamedTempFile::new_in(parent).map_err(move_err)?;
    io::copy(&mut reader, &mut tmp).map_err(move_err)?;
    tmp.persist(dest).map_err(|e| move_err(e.error))?;
    Ok(())
}
