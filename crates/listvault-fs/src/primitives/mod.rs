pub mod atomic_write;
pub mod dir;
pub mod place;

pub use atomic_write::{AtomicWriteOptions, atomic_write};
pub use dir::{ensure_dir, remove_dir_if_empty, remove_files_matching};
pub use place::place_file;
