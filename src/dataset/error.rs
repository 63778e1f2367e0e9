// src/dataset/error.rs
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("File has no header row")]
    MissingHeader,
    /// Short rows are padded; only extra fields are an error.
    #[error("Expected {expected} fields in line {line}, saw {found}")]
    TooManyFields {
        line: usize,
        found: usize,
        expected: usize,
    },
}

pub type DataResult<T> = Result<T, DataLoadError>;

/// Analysis-level conditions shown inline instead of a chart.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ViewError {
    #[error("Column '{0}' not found in dataset.")]
    ColumnNotFound(String),
    #[error("Column '{0}' is not numeric.")]
    NotNumeric(String),
    #[error("Select two different columns.")]
    SameColumns,
}
