//! # bitvavo-parqet - Bitvavo export to Parqet import conversion
//!
//! Reads a Bitvavo transaction export, keeps the buy transactions and
//! rewrites them in Parqet's CSV import layout.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ Bitvavo CSV │────▶│   Parser    │────▶│  Transform  │────▶│ Parqet CSV  │
//! │   (comma)   │     │ (auto-enc)  │     │ (buy only)  │     │ (semicolon) │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use bitvavo_parqet::{convert_files, ConvertOptions};
//!
//! let report = convert_files(&ConvertOptions::default()).unwrap();
//! println!("{}", report.summary());
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`models`] - Input/output rows and the Parqet header
//! - [`parser`] - Bitvavo CSV reading with encoding detection
//! - [`transform`] - Field rules, row transformer and pipeline
//! - [`writer`] - Parqet CSV writing
//! - [`config`] - Conversion options
//! - [`logs`] - Console logging

// Core modules
pub mod config;
pub mod error;
pub mod logs;
pub mod models;

// Reading
pub mod parser;

// Transformation
pub mod transform;

// Writing
pub mod writer;

// =============================================================================
// Re-exports - Errors
// =============================================================================

pub use error::{ConvertError, ConvertResult, ReadError, TransformError, WriteError};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{InputRow, OutputRow, TransactionType, HEADER};

// =============================================================================
// Re-exports - Config
// =============================================================================

pub use config::{ConvertOptions, FailureMode, DEFAULT_INPUT, DEFAULT_OUTPUT};

// =============================================================================
// Re-exports - Reading / Writing
// =============================================================================

pub use parser::{open_input, read_str, RowReader};
pub use writer::{create_output, ParqetWriter};

// =============================================================================
// Re-exports - Transform
// =============================================================================

pub use transform::transform_row;
pub use transform::pipeline::{
    convert,
    convert_files,
    convert_str,
    save_report,
    ConversionReport,
    SkippedRow,
};
