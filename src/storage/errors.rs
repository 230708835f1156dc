use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("Archive I/O error at [{path}]: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error
    },
    #[error("Archive document [{document_id}] could not be decoded: {source}")]
    CorruptDocument {
        document_id: u64,
        #[source]
        source: serde_json::Error
    },
    #[error("Archive record could not be encoded: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("Unsupported archive URI scheme [{0}], expected memory:// or file://")]
    UnsupportedScheme(String),
    #[error("Archive writer lock was poisoned")]
    Poisoned
}

impl ArchiveError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}
