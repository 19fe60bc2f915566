use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("Data directory not found at {0}")]
    DirNotFound(PathBuf),

    #[error("Invalid records in {path}: {message}")]
    Invalid { path: PathBuf, message: String },

    #[error("Failed to read or write {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to serialize records: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("No {kind} with id {id}")]
    NotFound { kind: &'static str, id: String },
}
