use std::fs;
use std::path::Path;
use std::process::Command;
use anyhow::Result;
use tempfile::tempdir;

const BINARY: &str = env!("CARGO_BIN_EXE_payment-event-cleaner");

#[test]
fn test_cli_archives_and_exports_sample() -> Result<()> {
    let workspace = tempdir()?;
    let archive_dir = workspace.path().join("archive");
    let export_path = workspace.path().join("clean_transactions.csv");
    let sample_path = Path::new("samples").join("raw_events.jsonl");

    let output = Command::new(BINARY)
        .arg(&sample_path)
        .env("ARCHIVE_URI", format!("file://{}", archive_dir.display()))
        .env("EXPORT_PATH", &export_path)
        .output()?;

    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;

    assert!(stdout.contains("PROCESS COMPLETE"));
    assert!(stdout.contains("Total archived: 10"));
    assert!(stdout.contains("Total cleaned: 4"));
    assert!(stdout.contains("Total rejected: 6"));
    assert!(stdout.contains(&format!("Exported: {}", export_path.display())));

    let archived = fs::read_to_string(archive_dir.join("raw_logs.jsonl"))?;

    assert_eq!(archived.lines().count(), 10);

    let exported = fs::read_to_string(&export_path)?;
    let lines: Vec<&str> = exported.lines().collect();

    assert_eq!(lines, vec![
        "transaction_id,event_id,amount_usd,timestamp",
        "pay_1,evt_a1,45.00,2025-01-15T10:00:00Z",
        "pay_5,evt_a5,12.5,2025-01-15T10:20:00Z",
        "pay_9,evt_a9,78.50,2025-01-15T10:40:00Z",
        "pay_10,evt_a10,310.40,2025-01-15T10:45:00Z",
    ]);

    Ok(())
}

#[test]
fn test_cli_looks_up_rejected_records_in_the_archive() -> Result<()> {
    let workspace = tempdir()?;
    let archive_uri = format!("file://{}", workspace.path().join("archive").display());

    let run = Command::new(BINARY)
        .arg(Path::new("samples").join("raw_events.jsonl"))
        .env("ARCHIVE_URI", &archive_uri)
        .env("EXPORT_PATH", workspace.path().join("clean_transactions.csv"))
        .output()?;

    assert!(run.status.success());

    let lookup = Command::new(BINARY)
        .args(["lookup", "entity.payment.id", "pay_2"])
        .env("ARCHIVE_URI", &archive_uri)
        .output()?;

    assert!(lookup.status.success());

    let stdout = String::from_utf8(lookup.stdout)?;
    let documents: Vec<serde_json::Value> = stdout.lines().map(serde_json::from_str).collect::<Result<_, _>>()?;

    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0]["event"]["id"], "evt_a2");
    assert_eq!(documents[0]["payload"]["flags"], "sandbox");

    Ok(())
}

#[test]
fn test_cli_reports_missing_input_without_failing() -> Result<()> {
    let workspace = tempdir()?;
    let export_path = workspace.path().join("clean_transactions.csv");

    let output = Command::new(BINARY)
        .arg(workspace.path().join("absent.jsonl"))
        .env("ARCHIVE_URI", "memory://")
        .env("EXPORT_PATH", &export_path)
        .output()?;

    assert!(output.status.success());
    assert!(String::from_utf8(output.stdout)?.contains("not found."));
    assert!(!export_path.exists());

    Ok(())
}

#[test]
fn test_cli_fails_without_archive_uri() -> Result<()> {
    let workspace = tempdir()?;

    let output = Command::new(BINARY)
        .arg(Path::new("samples").join("raw_events.jsonl"))
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .env_remove("ARCHIVE_URI")
        .env("EXPORT_PATH", workspace.path().join("out.csv"))
        .output()?;

    assert!(!output.status.success());
    assert!(String::from_utf8(output.stderr)?.contains("ARCHIVE_URI is not set"));

    Ok(())
}
