//! Content-addressed storage for verified filter lists.
//!
//! Each list is stored as `<root>/<md5hex(url)>.txt`, and the run's
//! identifier to URL map is written next to them as `metadata.json`.

mod error;
mod identifier;
mod metadata;
mod store;

pub use error::{Result, StoreError};
pub use identifier::{ARTIFACT_EXTENSION, identifier_for};
pub use metadata::{METADATA_FILE, MetadataMap};
pub use store::{ContentStore, StoredArtifact};
