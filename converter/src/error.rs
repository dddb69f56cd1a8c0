//! Error types for the conversion pipeline.
//!
//! - [`ReadError`] - Input decoding and CSV reading errors
//! - [`TransformError`] - Row transformation errors
//! - [`WriteError`] - Output serialization errors
//! - [`ConvertError`] - Top-level orchestration errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use std::path::PathBuf;

use thiserror::Error;

// =============================================================================
// Read Errors
// =============================================================================

/// Errors while opening, decoding or reading the input CSV.
#[derive(Debug, Error)]
pub enum ReadError {
    /// Input file could not be opened or read.
    #[error("Cannot read input file '{path}': {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input has no header line.
    #[error("Input CSV is empty")]
    EmptyFile,

    /// A column needed for conversion is absent from the header.
    #[error("Missing required column: '{0}'")]
    MissingColumn(String),

    /// A data line has a different number of fields than the header.
    #[error("Line {line}: expected {expected} fields, found {found}")]
    MalformedInput {
        line: u64,
        expected: usize,
        found: usize,
    },

    /// Any other CSV-level failure.
    #[error("Invalid CSV: {0}")]
    Csv(#[from] csv::Error),
}

// =============================================================================
// Transform Errors
// =============================================================================

/// Errors while transforming a single input row.
#[derive(Debug, Error)]
pub enum TransformError {
    /// `Date` + `Time` do not form a `YYYY-MM-DD HH:MM:SS.ffffff` timestamp.
    #[error("Line {line}: cannot parse date/time '{value}'")]
    DateParse { line: u64, value: String },
}

impl TransformError {
    /// Input line the error refers to.
    pub fn line(&self) -> u64 {
        match self {
            TransformError::DateParse { line, .. } => *line,
        }
    }
}

// =============================================================================
// Write Errors
// =============================================================================

/// Errors while writing the output CSV.
#[derive(Debug, Error)]
pub enum WriteError {
    /// Output file could not be created.
    #[error("Cannot create output file '{path}': {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Flushing or writing failed.
    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization failed.
    #[error("Failed to write CSV record: {0}")]
    Csv(#[from] csv::Error),
}

// =============================================================================
// Convert Errors (top-level)
// =============================================================================

/// Top-level conversion errors.
///
/// This is the error returned by [`crate::transform::pipeline::convert_files`].
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Reading error.
    #[error("Read error: {0}")]
    Read(#[from] ReadError),

    /// Row transformation error.
    #[error("Transform error: {0}")]
    Transform(#[from] TransformError),

    /// Writing error.
    #[error("Write error: {0}")]
    Write(#[from] WriteError),

    /// Conversion report could not be saved.
    #[error("Failed to save report: {0}")]
    Report(String),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for reading operations.
pub type ReadResult<T> = Result<T, ReadError>;

/// Result type for transformation operations.
pub type TransformResult<T> = Result<T, TransformError>;

/// Result type for writing operations.
pub type WriteResult<T> = Result<T, WriteError>;

/// Result type for conversion operations.
pub type ConvertResult<T> = Result<T, ConvertError>;
