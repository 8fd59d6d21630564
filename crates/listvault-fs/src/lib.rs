//! Filesystem primitives for staged downloads.
//!
//! Every write that becomes visible to readers goes through a temp file and a
//! rename, so consumers of the output directory never see partial files.

mod error;
pub mod primitives;

pub use error::{Error, Result};
pub use primitives::{
    AtomicWriteOptions, atomic_write, ensure_dir, place_file, remove_dir_if_empty,
    remove_files_matching,
};
