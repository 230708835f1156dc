mod archive_store;
mod errors;
mod field_index;
mod file_archive;
mod memory_archive;
#[cfg(test)]
mod tests;

use serde_json::Value;

pub use archive_store::ArchiveStore;
pub use errors::ArchiveError;
pub use field_index::FieldIndexes;
pub use file_archive::FileArchive;
pub use memory_archive::MemoryArchive;

/// Sequential identifier assigned to each archived document.
pub type DocumentId = u64;

/// Nested fields every archive is indexed on.
pub const ARCHIVE_INDEXES: [&str; 2] = ["event.id", "entity.payment.id"];

/// Schema-less, append-only store for raw event records.
///
/// Inserts are at-least-once: the same record inserted twice is stored twice.
pub trait ArchiveSink: Send + Sync + 'static {
    /// Declares a secondary index on a dotted field path. Declaring an
    /// existing index is a no-op.
    fn create_index(&self, field: &str) -> Result<(), ArchiveError>;
    fn insert(&self, record: &Value) -> Result<DocumentId, ArchiveError>;
    /// Documents whose indexed `field` equals `key`, in insertion order.
    /// Empty when the field has no index.
    fn find(&self, field: &str, key: &str) -> Result<Vec<Value>, ArchiveError>;
    fn flush(&self) -> Result<(), ArchiveError> {
        Ok(())
    }
}
