use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by bench-stats.
#[derive(Error, Debug)]
pub enum StatsError {
    /// A line did not match the expected shape for the selected extractor.
    #[error("Malformed line {line}: {reason}")]
    MalformedLine { line: usize, reason: String },

    /// A measurement parsed to NaN or an infinity.
    #[error("Non-finite value on line {line}: {value}")]
    NonFiniteValue { line: usize, value: f64 },

    /// The input file could not be opened or read.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading a line from an already open input failed.
    #[error("Failed to read line {line}: {source}")]
    LineRead {
        line: usize,
        #[source]
        source: std::io::Error,
    },

    /// The output file could not be created or written.
    #[error("Failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A CSV record could not be serialized.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl StatsError {
    /// Shorthand for a [`StatsError::MalformedLine`].
    pub fn malformed(line: usize, reason: impl Into<String>) -> Self {
        StatsError::MalformedLine {
            line,
            reason: reason.into(),
        }
    }
}

/// Convenience alias used throughout the bench-stats crates.
pub type Result<T> = std::result::Result<T, StatsError>;
