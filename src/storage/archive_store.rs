use crate::storage::{ArchiveError, ArchiveSink, DocumentId, FileArchive, MemoryArchive};
use serde_json::Value;
use tracing::debug;

const MEMORY_SCHEME: &str = "memory://";
const FILE_SCHEME: &str = "file://";

/// The archive backend chosen by the connection string.
pub enum ArchiveStore {
    Memory(MemoryArchive),
    File(FileArchive)
}

impl ArchiveStore {
    /// Opens the archive named by `uri`:
    /// - `memory://` keeps documents in process memory
    /// - `file://<dir>`, or a bare directory path, appends to a JSON Lines file
    pub fn connect(uri: &str) -> Result<Self, ArchiveError> {
        let uri = uri.trim();

        if uri.starts_with(MEMORY_SCHEME) {
            debug!("Using in-memory archive");
            return Ok(ArchiveStore::Memory(MemoryArchive::new()));
        }

        let directory = match uri.strip_prefix(FILE_SCHEME) {
            Some(directory) => directory,
            None => match uri.split_once("://") {
                Some((scheme, _)) => return Err(ArchiveError::UnsupportedScheme(scheme.to_string())),
                None => uri
            }
        };

        let archive = FileArchive::open(directory)?;
        debug!("Using file archive at {}", archive.path().display());

        Ok(ArchiveStore::File(archive))
    }
}

impl ArchiveSink for ArchiveStore {
    fn create_index(&self, field: &str) -> Result<(), ArchiveError> {
        match self {
            ArchiveStore::Memory(archive) => archive.create_index(field),
            ArchiveStore::File(archive) => archive.create_index(field)
        }
    }

    fn insert(&self, record: &Value) -> Result<DocumentId, ArchiveError> {
        match self {
            ArchiveStore::Memory(archive) => archive.insert(record),
            ArchiveStore::File(archive) => archive.insert(record)
        }
    }

    fn find(&self, field: &str, key: &str) -> Result<Vec<Value>, ArchiveError> {
        match self {
            ArchiveStore::Memory(archive) => archive.find(field, key),
            ArchiveStore::File(archive) => archive.find(field, key)
        }
    }

    fn flush(&self) -> Result<(), ArchiveError> {
        match self {
            ArchiveStore::Memory(archive) => archive.flush(),
            ArchiveStore::File(archive) => archive.flush()
        }
    }
}
