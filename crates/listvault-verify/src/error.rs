use std::io;
use std::str::Utf8Error;

#[derive(Debug, thiserror::Error)]
pub enum VerificationError {
    #[error("checksum mismatch: found {expected}, computed {actual}")]
    Mismatch { expected: String, actual: String },

    #[error("document is not valid UTF-8: {0}")]
    NotUtf8(#[from] Utf8Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, VerificationError>;
