use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to load environment variables for database connection: {0}")]
    ConnectionConfigError(String),

    #[error("Failed to query the record store: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Stored record is corrupt: {0}")]
    CorruptRecord(#[from] core_types::CoreError),

    #[error("Failed to read snapshot file {path}: {source}")]
    SnapshotIo {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse snapshot file {path}: {source}")]
    SnapshotFormat {
        path: String,
        source: serde_json::Error,
    },
}
