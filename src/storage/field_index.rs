use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde_json::Value;

use crate::storage::DocumentId;

/// Secondary indexes over nested document fields, keyed by dotted path
/// (`entity.payment.id`). Documents whose field is absent or `null` are not
/// indexed.
pub struct FieldIndexes {
    indexes: DashMap<String, DashMap<String, Vec<DocumentId>>>
}

impl FieldIndexes {
    pub fn new() -> Self {
        Self {
            indexes: DashMap::new()
        }
    }

    /// Returns `true` when the index did not exist yet and still needs back-filling.
    pub fn declare(&self, field: &str) -> bool {
        match self.indexes.entry(field.to_string()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(entry) => {
                entry.insert(DashMap::new());
                true
            }
        }
    }

    /// Adds a document to every declared index.
    pub fn index_document(&self, document_id: DocumentId, record: &Value) {
        for index in self.indexes.iter() {
            if let Some(key) = index_key(record, index.key()) {
                index.value().entry(key).or_default().push(document_id);
            }
        }
    }

    /// Adds a document to a single index, used when back-filling.
    pub fn index_field(&self, field: &str, document_id: DocumentId, record: &Value) {
        let Some(index) = self.indexes.get(field) else {
            return;
        };

        if let Some(key) = index_key(record, field) {
            index.entry(key).or_default().push(document_id);
        }
    }

    /// Document ids whose `field` equals `key`, in insertion order.
    /// `None` when no index exists for `field`.
    pub fn lookup(&self, field: &str, key: &str) -> Option<Vec<DocumentId>> {
        let index = self.indexes.get(field)?;
        let ids = index.get(key).map(|ids| ids.value().clone()).unwrap_or_default();

        Some(ids)
    }
}

fn index_key(record: &Value, field: &str) -> Option<String> {
    let pointer = format!("/{}", field.replace('.', "/"));

    match record.pointer(&pointer)? {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string())
    }
}
