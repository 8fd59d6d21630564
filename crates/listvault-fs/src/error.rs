use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to write '{path}': {source}")]
    Write { path: PathBuf, source: io::Error },

    #[error("failed to read '{path}': {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to move '{from}' to '{to}': {source}")]
    Move {
        from:   PathBuf,
        to:     PathBuf,
        source: io::Error,
    },

    #[error("failed to create directory '{path}': {source}")]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("path has no parent directory: '{0}'")]
    NoParent(PathBuf),
}

impl Error {
    /// The underlying I/O error, if any.
    pub fn io(&self) -> Option<&io::Error> {
        match self {
            Error::Write { source, .. }
            | Error::Read { source, .. }
            | Error::Move { source, .. }
            | Error::CreateDir { source, .. } => Some(source),
            Error::NoParent(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
