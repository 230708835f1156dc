use super::{ArchiveError, ArchiveSink, ArchiveStore, FileArchive, MemoryArchive, ARCHIVE_INDEXES};
use anyhow::{anyhow, Result};
use serde_json::{json, Value};
use std::fs;
use tempfile::tempdir;

fn create_record(event_id: &str, payment_id: Value) -> Value {
    json!({
        "event": {"id": event_id, "ts": "2025-01-15T10:00:00Z"},
        "entity": {"payment": {"id": payment_id}},
        "payload": {"Amount": "$1.00", "status": "SUCCESS", "extra": [1, 2, 3]}
    })
}

#[test]
fn test_memory_archive_stores_records_verbatim() -> Result<()> {
    let archive = MemoryArchive::new();
    let record = create_record("evt_1", json!("pay_1"));

    let document_id = archive.insert(&record)?;

    assert_eq!(archive.len(), 1);
    assert_eq!(archive.get(document_id), Some(record));

    Ok(())
}

#[test]
fn test_memory_archive_keeps_duplicate_inserts() -> Result<()> {
    let archive = MemoryArchive::new();
    let record = create_record("evt_1", json!("pay_1"));

    let first = archive.insert(&record)?;
    let second = archive.insert(&record)?;

    assert_ne!(first, second);
    assert_eq!(archive.len(), 2);

    Ok(())
}

#[test]
fn test_memory_archive_finds_records_by_nested_field() -> Result<()> {
    let archive = MemoryArchive::new();
    for field in ARCHIVE_INDEXES {
        archive.create_index(field)?;
    }

    archive.insert(&create_record("evt_1", json!("pay_1")))?;
    archive.insert(&create_record("evt_2", json!("pay_2")))?;
    archive.insert(&create_record("evt_3", json!("pay_1")))?;
    archive.insert(&create_record("evt_4", Value::Null))?;

    let matches = archive.find("entity.payment.id", "pay_1")?;

    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0]["event"]["id"], json!("evt_1"));
    assert_eq!(matches[1]["event"]["id"], json!("evt_3"));
    assert_eq!(archive.find("event.id", "evt_4")?.len(), 1);
    assert!(archive.find("entity.payment.id", "missing")?.is_empty());
    assert!(archive.find("payload.status", "SUCCESS")?.is_empty());

    Ok(())
}

#[test]
fn test_index_declaration_is_idempotent_and_back_fills() -> Result<()> {
    let archive = MemoryArchive::new();
    archive.insert(&create_record("evt_1", json!("pay_1")))?;

    archive.create_index("entity.payment.id")?;
    archive.create_index("entity.payment.id")?;
    archive.insert(&create_record("evt_2", json!("pay_1")))?;

    assert_eq!(archive.find("entity.payment.id", "pay_1")?.len(), 2);

    Ok(())
}

#[test]
fn test_file_archive_appends_json_lines() -> Result<()> {
    let directory = tempdir()?;
    let archive = FileArchive::open(directory.path())?;

    archive.insert(&create_record("evt_1", json!("pay_1")))?;
    archive.insert(&create_record("evt_2", json!("pay_2")))?;
    archive.flush()?;

    let contents = fs::read_to_string(archive.path())?;
    let lines: Vec<Value> = contents.lines().map(serde_json::from_str).collect::<Result<_, _>>()?;

    assert_eq!(lines.len(), 2);
    assert_eq!(lines[1], create_record("evt_2", json!("pay_2")));

    Ok(())
}

#[test]
fn test_file_archive_reopen_continues_ids_and_rebuilds_indexes() -> Result<()> {
    let directory = tempdir()?;

    {
        let archive = FileArchive::open(directory.path())?;
        archive.insert(&create_record("evt_1", json!("pay_1")))?;
        archive.insert(&create_record("evt_2", json!("pay_2")))?;
        archive.flush()?;
    }

    let archive = FileArchive::open(directory.path())?;
    let document_id = archive.insert(&create_record("evt_3", json!("pay_1")))?;
    archive.create_index("entity.payment.id")?;

    assert_eq!(document_id, 2);

    let matches = archive.find("entity.payment.id", "pay_1")?;

    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0]["event"]["id"], json!("evt_1"));
    assert_eq!(matches[1]["event"]["id"], json!("evt_3"));

    Ok(())
}

#[test]
fn test_archive_store_selects_backend_from_uri() -> Result<()> {
    let directory = tempdir()?;
    let file_uri = format!("file://{}", directory.path().display());

    assert!(matches!(ArchiveStore::connect("memory://")?, ArchiveStore::Memory(_)));
    assert!(matches!(ArchiveStore::connect(&file_uri)?, ArchiveStore::File(_)));

    let bare_path = directory.path().join("bare");
    let bare_uri = bare_path.to_str().ok_or_else(|| anyhow!("Temporary path is not UTF-8"))?;

    assert!(matches!(ArchiveStore::connect(bare_uri)?, ArchiveStore::File(_)));
    assert!(bare_path.join("raw_logs.jsonl").exists());

    Ok(())
}

#[test]
fn test_archive_store_rejects_unknown_schemes() {
    let result = ArchiveStore::connect("mongodb://localhost:27017");

    assert!(matches!(result, Err(ArchiveError::UnsupportedScheme(scheme)) if scheme == "mongodb"));
}

#[test]
fn test_archive_store_finds_records_after_reconnecting() -> Result<()> {
    let directory = tempdir()?;
    let uri = format!("file://{}", directory.path().display());

    {
        let archive = ArchiveStore::connect(&uri)?;
        archive.insert(&create_record("evt_1", json!("pay_1")))?;
        archive.insert(&create_record("evt_2", json!("pay_2")))?;
        archive.flush()?;
    }

    let archive = ArchiveStore::connect(&uri)?;
    archive.create_index("event.id")?;

    assert_eq!(archive.find("event.id", "evt_2")?, vec![create_record("evt_2", json!("pay_2"))]);
    assert!(archive.find("entity.payment.id", "pay_1")?.is_empty());

    Ok(())
}
