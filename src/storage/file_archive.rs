use crate::storage::{ArchiveError, ArchiveSink, DocumentId, FieldIndexes};
use serde_json::Value;
use std::fs::{create_dir_all, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

const ARCHIVE_FILE: &str = "raw_logs.jsonl";

/// Append-only JSON Lines archive, selected with `file://<dir>`.
///
/// Each document is one line of `<dir>/raw_logs.jsonl`; its id is the line
/// ordinal. Reopening an existing archive continues the numbering. Indexes
/// live in memory and are rebuilt from the file when declared.
pub struct FileArchive {
    path: PathBuf,
    writer: Mutex<BufWriter<File>>,
    next_id: AtomicU64,
    indexes: FieldIndexes
}

impl FileArchive {
    pub fn open(directory: impl AsRef<Path>) -> Result<Self, ArchiveError> {
        let directory = directory.as_ref();
        create_dir_all(directory).map_err(|error| ArchiveError::io(directory, error))?;

        let path = directory.join(ARCHIVE_FILE);
        let existing = count_documents(&path)?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|error| ArchiveError::io(&path, error))?;

        Ok(Self {
            path,
            writer: Mutex::new(BufWriter::new(file)),
            next_id: AtomicU64::new(existing),
            indexes: FieldIndexes::new()
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn scan(&self, mut visit: impl FnMut(DocumentId, Value)) -> Result<(), ArchiveError> {
        let file = File::open(&self.path).map_err(|error| ArchiveError::io(&self.path, error))?;

        for (document_id, line) in (0..).zip(BufReader::new(file).lines()) {
            let line = line.map_err(|error| ArchiveError::io(&self.path, error))?;
            let record = serde_json::from_str(&line)
                .map_err(|source| ArchiveError::CorruptDocument { document_id, source })?;

            visit(document_id, record);
        }

        Ok(())
    }
}

impl ArchiveSink for FileArchive {
    fn create_index(&self, field: &str) -> Result<(), ArchiveError> {
        if !self.indexes.declare(field) {
            return Ok(());
        }

        self.flush()?;
        self.scan(|document_id, record| self.indexes.index_field(field, document_id, &record))
    }

    fn insert(&self, record: &Value) -> Result<DocumentId, ArchiveError> {
        let line = serde_json::to_string(record)?;
        let mut writer = self.writer.lock().map_err(|_| ArchiveError::Poisoned)?;

        writeln!(writer, "{line}").map_err(|error| ArchiveError::io(&self.path, error))?;

        let document_id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.indexes.index_document(document_id, record);

        Ok(document_id)
    }

    fn find(&self, field: &str, key: &str) -> Result<Vec<Value>, ArchiveError> {
        let document_ids = self.indexes.lookup(field, key).unwrap_or_default();

        if document_ids.is_empty() {
            return Ok(Vec::new());
        }

        self.flush()?;

        let mut documents = Vec::with_capacity(document_ids.len());
        self.scan(|document_id, record| {
            if document_ids.contains(&document_id) {
                documents.push(record);
            }
        })?;

        Ok(documents)
    }

    fn flush(&self) -> Result<(), ArchiveError> {
        let mut writer = self.writer.lock().map_err(|_| ArchiveError::Poisoned)?;

        writer.flush().map_err(|error| ArchiveError::io(&self.path, error))
    }
}

fn count_documents(path: &Path) -> Result<DocumentId, ArchiveError> {
    if !path.exists() {
        return Ok(0);
    }

    let file = File::open(path).map_err(|error| ArchiveError::io(path, error))?;
    let mut count = 0;

    for line in BufReader::new(file).lines() {
        line.map_err(|error| ArchiveError::io(path, error))?;
        count += 1;
    }

    Ok(count)
}
