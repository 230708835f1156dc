mod config;
mod engine;
mod export;
mod models;
mod storage;
mod types;

use std::io::{stderr, stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use crate::config::Settings;
use crate::engine::{ExportOutcome, Pipeline, RunSummary};
use crate::export::CsvExport;
use crate::storage::{ArchiveSink, ArchiveStore};

const LOOKUP_COMMAND: &str = "lookup";

#[tokio::main]
async fn main() -> Result<()> {
    //NOTE: Usage: payment-event-cleaner [input].jsonl [log_level:optional]
    //             payment-event-cleaner lookup [field] [value] [log_level:optional]
    //      Everything else comes from the environment (or a .env file), see config::Settings.
    let args: Vec<String> = std::env::args().collect();
    let is_lookup = args.get(1).is_some_and(|command| command == LOOKUP_COMMAND);

    let log_level = args.get(if is_lookup { 4 } else { 2 })
        .map(|s| parse_log_level(s)).unwrap_or_else(|| LevelFilter::ERROR);

    setup_logging(log_level);

    dotenv::dotenv().ok();

    if is_lookup {
        let (Some(field), Some(key)) = (args.get(2), args.get(3)) else {
            eprintln!("Usage: payment-event-cleaner lookup [field] [value] [log_level:optional]");
            std::process::exit(1);
        };

        let settings = Settings::from_env(None)?;
        let archive = ArchiveStore::connect(&settings.archive_uri)
            .context("Could not connect to the raw event archive")?;

        return write_documents_to_stdout(&archive, field, key);
    }

    let settings = Settings::from_env(args.get(1).map(PathBuf::from))?;

    let archive = ArchiveStore::connect(&settings.archive_uri)
        .context("Could not connect to the raw event archive")?;
    let exporter = CsvExport::new(&settings.export_path);
    let pipeline = Pipeline::new(Arc::new(archive), exporter)
        .with_backpressure(settings.backpressure);

    let timer = Instant::now();
    let summary = pipeline.run(&settings.input_path).await?;
    let duration = timer.elapsed();

    info!("Processed raw events in: {duration:?}");

    write_summary_to_stdout(&summary)?;

    Ok(())
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'error'", level);
            LevelFilter::ERROR
        }
    }
}

fn setup_logging(level: LevelFilter) {
    //NOTE: stdout carries the run summary, logging goes to stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}

fn write_summary_to_stdout(summary: &RunSummary) -> Result<()> {
    let mut output = BufWriter::new(stdout().lock());

    let destination = match &summary.outcome {
        ExportOutcome::InputMissing(path) => {
            writeln!(output, "Error: {} not found.", path.display())?;
            output.flush()?;
            return Ok(());
        }
        ExportOutcome::NoValidRecords => {
            writeln!(output, "No valid records found.")?;
            None
        }
        ExportOutcome::Exported { destination, .. } => Some(destination.as_str())
    };

    writeln!(output, "====================================")?;
    writeln!(output, "PROCESS COMPLETE")?;
    writeln!(output, "Total archived: {}", summary.stats.archived_count)?;
    writeln!(output, "Total cleaned: {}", summary.stats.cleaned_count)?;
    writeln!(output, "Total rejected: {}", summary.stats.rejections.total())?;
    writeln!(output, "Exported: {}", destination.unwrap_or("nothing"))?;
    writeln!(output, "====================================")?;

    output.flush()?;

    Ok(())
}

fn write_documents_to_stdout(archive: &impl ArchiveSink, field: &str, key: &str) -> Result<()> {
    archive.create_index(field)?;

    let documents = archive.find(field, key)?;
    let mut output = BufWriter::new(stdout().lock());

    for document in &documents {
        writeln!(output, "{document}")?;
    }

    output.flush()?;

    info!("Found {} archived records where {field} = {key}", documents.len());

    Ok(())
}
