use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::export::ExportError;
use crate::storage::ArchiveError;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Input file [{path}] could not be opened: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error
    },
    #[error("Input line [{line}] could not be read: {source}")]
    Read {
        line: usize,
        #[source]
        source: io::Error
    },
    #[error("Input line [{line}] is not valid JSON: {source}")]
    Decode {
        line: usize,
        #[source]
        source: serde_json::Error
    },
    #[error("Input line [{line}] is not a JSON object")]
    NotAnObject {
        line: usize
    },
    #[error(transparent)]
    Archive(#[from] ArchiveError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error("Input reader task failed: {0}")]
    Reader(String)
}
