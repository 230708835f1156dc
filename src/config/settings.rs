use std::env;
use std::path::PathBuf;

use crate::config::ConfigError;

pub const ARCHIVE_URI: &str = "ARCHIVE_URI";
pub const INPUT_PATH: &str = "INPUT_PATH";
pub const EXPORT_PATH: &str = "EXPORT_PATH";
pub const PIPELINE_BACKPRESSURE: &str = "PIPELINE_BACKPRESSURE";

const DEFAULT_INPUT_PATH: &str = "quickcart_data/raw_data.jsonl";
const DEFAULT_EXPORT_PATH: &str = "clean_transactions.csv";
const DEFAULT_BACKPRESSURE: usize = 256;

/// Process configuration, built once at startup and handed to the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Connection string of the raw event archive. Required.
    pub archive_uri: String,
    /// JSON Lines file of raw events.
    pub input_path: PathBuf,
    /// Destination of the clean transaction table.
    pub export_path: PathBuf,
    /// Capacity of the channel between the line reader and the pipeline.
    pub backpressure: usize
}

impl Settings {
    /// Reads settings from the process environment. `input_override` (the CLI
    /// argument) takes precedence over `INPUT_PATH`.
    pub fn from_env(input_override: Option<PathBuf>) -> Result<Self, ConfigError> {
        Self::from_lookup(input_override, |name| env::var(name).ok())
    }

    pub fn from_lookup<F>(input_override: Option<PathBuf>, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let archive_uri = read(ARCHIVE_URI).ok_or(ConfigError::MissingVariable(ARCHIVE_URI))?;

        let input_path = input_override
            .or_else(|| read(INPUT_PATH).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT_PATH));

        let export_path = read(EXPORT_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_EXPORT_PATH));

        let backpressure = match read(PIPELINE_BACKPRESSURE) {
            Some(value) => parse_positive(PIPELINE_BACKPRESSURE, &value)?,
            None => DEFAULT_BACKPRESSURE
        };

        Ok(Self {
            archive_uri,
            input_path,
            export_path,
            backpressure
        })
    }
}

fn parse_positive(name: &'static str, value: &str) -> Result<usize, ConfigError> {
    match value.trim().parse::<usize>() {
        Ok(number) if number > 0 => Ok(number),
        _ => Err(ConfigError::InvalidNumber { name, value: value.to_string() })
    }
}
