use std::path::PathBuf;
use thiserror::Error;

use crate::error::internal::InternalError;

/// Errors raised while reading or writing the table documents.
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// A document exists but is not valid JSON of the expected shape.
    ///
    /// Fatal at startup. The file is left untouched so it can be repaired by hand.
    #[error("Table document {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A record parsed as JSON but holds a value the domain model rejects.
    #[error("Table {table_id} in {path} is invalid: {source}")]
    InvalidRecord {
        path: PathBuf,
        table_id: String,
        #[source]
        source: InternalError,
    },

    /// The document could not be read from disk.
    #[error("Failed to read table document {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document could not be written; the previous version is still in place.
    #[error("Failed to write table document {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A snapshot could not be serialized to JSON.
    #[error("Failed to serialize table document: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The blocking I/O task was cancelled or panicked.
    #[error("Table document I/O task failed: {0}")]
    Interrupted(#[from] tokio::task::JoinError),
}

impl PersistenceError {
    /// Whether the on-disk data itself is unreadable, as opposed to a transient I/O failure.
    pub fn is_corrupt(&self) -> bool {
        matches!(self, Self::Corrupt { .. } | Self::InvalidRecord { .. })
    }
}
