mod csv_export;
mod errors;

use crate::models::CleanTransaction;

pub use csv_export::CsvExport;
pub use errors::ExportError;

/// Destination for the accumulated clean transactions of one run.
pub trait ExportSink {
    /// Writes the full ordered set of rows as a single table.
    fn write_table(&self, rows: &[CleanTransaction]) -> Result<(), ExportError>;
    /// Human-readable location of the table, used in the run summary.
    fn destination(&self) -> String;
}
