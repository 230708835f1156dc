use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Export I/O error at [{path}]: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error
    },
    #[error("Export CSV error at [{path}]: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error
    }
}
