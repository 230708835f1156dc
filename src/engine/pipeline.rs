use crate::engine::{ExportOutcome, PipelineError, RunStats, RunSummary};
use crate::export::ExportSink;
use crate::models::{classify, Classification, CleanTransaction};
use crate::storage::{ArchiveSink, ARCHIVE_INDEXES};
use serde_json::Value;
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::{spawn_blocking, JoinHandle};
use tracing::{error, info, warn};

type DecodedLine = Result<Value, PipelineError>;

/// Archives every raw payment event and derives the clean transaction table.
pub struct Pipeline<A: ArchiveSink, E: ExportSink> {
    archive: Arc<A>,
    exporter: E,
    backpressure: usize
}

impl<A: ArchiveSink, E: ExportSink> Pipeline<A, E> {
    /// Creates a pipeline writing to the given archive and export sinks.
    pub fn new(archive: Arc<A>, exporter: E) -> Self {
        Self {
            archive,
            exporter,
            backpressure: 256
        }
    }

    pub fn with_backpressure(mut self, backpressure: usize) -> Self {
        self.backpressure = backpressure.max(1);
        self
    }

    /// Processes a JSON Lines file. A missing file is reported in the summary
    /// rather than as an error.
    pub async fn run(&self, path: &Path) -> Result<RunSummary, PipelineError> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                warn!("Input file {} was not found, nothing to process", path.display());

                return Ok(RunSummary {
                    stats: RunStats::default(),
                    outcome: ExportOutcome::InputMissing(path.to_path_buf())
                });
            }
            Err(source) => return Err(PipelineError::Open { path: path.to_path_buf(), source })
        };

        self.run_reader(BufReader::new(file)).await
    }

    /// Processes a stream of JSON Lines.
    ///
    /// Every decoded record is archived before it is classified. An undecodable
    /// line aborts the run; records archived before it stay archived.
    pub async fn run_reader<R>(&self, reader: R) -> Result<RunSummary, PipelineError>
    where
        R: BufRead + Send + 'static,
    {
        for field in ARCHIVE_INDEXES {
            self.archive.create_index(field)?;
        }

        let (sender, receiver) = mpsc::channel::<DecodedLine>(self.backpressure);
        let reader_handle = Self::spawn_line_reader(reader, sender);
        let processing_result = self.process_records(receiver).await;
        let reader_result = reader_handle.await;

        if let Err(error) = &reader_result {
            error!("Input reader task failed: {error}");
        }

        let (stats, transactions) = processing_result?;
        reader_result.map_err(|error| PipelineError::Reader(error.to_string()))?;

        let outcome = self.export(&transactions)?;

        info!(
            "Archived {} records, cleaned {}, rejected {} | not_successful={} missing_payment_id={} missing_amount={} unparseable_amount={} test_transaction={}",
            stats.archived_count,
            stats.cleaned_count,
            stats.rejections.total(),
            stats.rejections.not_successful,
            stats.rejections.missing_payment_id,
            stats.rejections.missing_amount,
            stats.rejections.unparseable_amount,
            stats.rejections.test_transaction
        );

        Ok(RunSummary { stats, outcome })
    }

    fn spawn_line_reader<R>(reader: R, sender: mpsc::Sender<DecodedLine>) -> JoinHandle<()>
    where
        R: BufRead + Send + 'static,
    {
        spawn_blocking(move || {
            for (index, line) in reader.lines().enumerate() {
                let line_number = index + 1;

                let decoded = match line {
                    Ok(text) if text.trim().is_empty() => continue,
                    Ok(text) => decode_line(line_number, &text),
                    Err(source) => Err(PipelineError::Read { line: line_number, source })
                };

                let is_fatal = decoded.is_err();

                if sender.blocking_send(decoded).is_err() || is_fatal {
                    break;
                }
            }
        })
    }

    async fn process_records(&self, mut receiver: mpsc::Receiver<DecodedLine>) -> Result<(RunStats, Vec<CleanTransaction>), PipelineError> {
        let mut stats = RunStats::default();
        let mut transactions = Vec::new();

        while let Some(decoded) = receiver.recv().await {
            let record = decoded?;

            self.archive.insert(&record)?;
            stats.archived_count += 1;

            match classify(&record) {
                Classification::Accepted(transaction) => {
                    transactions.push(transaction);
                    stats.cleaned_count += 1;
                }
                Classification::Rejected(rejection) => stats.rejections.record(rejection)
            }
        }

        self.archive.flush()?;

        Ok((stats, transactions))
    }

    fn export(&self, transactions: &[CleanTransaction]) -> Result<ExportOutcome, PipelineError> {
        if transactions.is_empty() {
            return Ok(ExportOutcome::NoValidRecords);
        }

        self.exporter.write_table(transactions)?;

        Ok(ExportOutcome::Exported {
            destination: self.exporter.destination(),
            rows: transactions.len()
        })
    }
}

fn decode_line(line: usize, text: &str) -> DecodedLine {
    let record: Value = serde_json::from_str(text)
        .map_err(|source| PipelineError::Decode { line, source })?;

    if !record.is_object() {
        return Err(PipelineError::NotAnObject { line });
    }

    Ok(record)
}
