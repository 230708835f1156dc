use crate::storage::{ArchiveError, ArchiveSink, DocumentId, FieldIndexes};
use dashmap::DashMap;
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};

/// Archive held entirely in memory, selected with `memory://`.
pub struct MemoryArchive {
    documents: DashMap<DocumentId, Value>,
    next_id: AtomicU64,
    indexes: FieldIndexes
}

impl MemoryArchive {
    pub fn new() -> Self {
        Self {
            documents: DashMap::new(),
            next_id: AtomicU64::new(0),
            indexes: FieldIndexes::new()
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn get(&self, document_id: DocumentId) -> Option<Value> {
        self.documents.get(&document_id).map(|document| document.value().clone())
    }
}

impl ArchiveSink for MemoryArchive {
    fn create_index(&self, field: &str) -> Result<(), ArchiveError> {
        if self.indexes.declare(field) {
            let mut existing: Vec<_> = self.documents.iter()
                .map(|document| (*document.key(), document.value().clone()))
                .collect();
            existing.sort_by_key(|(document_id, _)| *document_id);

            for (document_id, record) in existing {
                self.indexes.index_field(field, document_id, &record);
            }
        }

        Ok(())
    }

    fn insert(&self, record: &Value) -> Result<DocumentId, ArchiveError> {
        let document_id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.indexes.index_document(document_id, record);
        self.documents.insert(document_id, record.clone());

        Ok(document_id)
    }

    fn find(&self, field: &str, key: &str) -> Result<Vec<Value>, ArchiveError> {
        let documents = self.indexes.lookup(field, key)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|document_id| self.get(document_id))
            .collect();

        Ok(documents)
    }
}
