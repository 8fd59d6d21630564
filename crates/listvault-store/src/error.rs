#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to commit '{identifier}': {source}")]
    Commit {
        identifier: String,
        #[source]
        source:     listvault_fs::Error,
    },

    #[error("failed to write metadata: {0}")]
    Metadata(#[source] listvault_fs::Error),

    #[error("invalid metadata: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;
