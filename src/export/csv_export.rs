use crate::export::{ExportError, ExportSink};
use crate::models::CleanTransaction;
use csv::WriterBuilder;
use std::fs::create_dir_all;
use std::path::{Path, PathBuf};

/// Column order of the exported table.
pub const CSV_HEADER: [&str; 4] = ["transaction_id", "event_id", "amount_usd", "timestamp"];

/// Writes clean transactions to a CSV file, replacing any previous export.
pub struct CsvExport {
    path: PathBuf
}

impl CsvExport {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into()
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn csv_error(&self, source: csv::Error) -> ExportError {
        ExportError::Csv { path: self.path.clone(), source }
    }
}

impl ExportSink for CsvExport {
    fn write_table(&self, rows: &[CleanTransaction]) -> Result<(), ExportError> {
        if let Some(parent) = self.path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            create_dir_all(parent).map_err(|source| ExportError::Io { path: parent.to_path_buf(), source })?;
        }

        //NOTE: The header is written explicitly so an empty table still carries its columns
        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .from_path(&self.path)
            .map_err(|error| self.csv_error(error))?;

        writer.write_record(CSV_HEADER).map_err(|error| self.csv_error(error))?;

        for row in rows {
            writer.serialize(row).map_err(|error| self.csv_error(error))?;
        }

        writer.flush().map_err(|source| ExportError::Io { path: self.path.clone(), source })?;

        Ok(())
    }

    fn destination(&self) -> String {
        self.path().display().to_string()
    }
}
