// Domain errors
use std::path::PathBuf;
use thiserror::Error;

/// Failure to build the dataset at startup. Always fatal.
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("failed to read data file '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("data source contains no usable records")]
    Empty,

    #[error("required column '{0}' not found in header")]
    MissingColumn(String),

    #[error("line {line}: unparseable date '{value}' (expected DD-MM-YYYY)")]
    InvalidDate { line: u64, value: String },

    #[error("line {line}: unparseable unemployment rate '{value}'")]
    InvalidRate { line: u64, value: String },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// A selector value that is neither a known region nor the "All" sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown region '{0}'")]
pub struct InvalidRegionError(pub String);
