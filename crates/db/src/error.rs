use fibertrack_core::error::CoreError;

/// Failure while reading or writing the key-value blob store.
#[derive(Debug, thiserror::Error)]
pub enum BlobError {
    #[error("Blob store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Blob serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid blob key '{0}'")]
    InvalidKey(String),
}

/// Error type for container operations that may also touch durable storage.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Blob(#[from] BlobError),
}
