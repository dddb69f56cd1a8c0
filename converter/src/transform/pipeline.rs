//! End-to-end conversion: Bitvavo export in, Parqet import out.
//!
//! Rows stream from the reader through [`transform_row`] straight into the
//! writer, so only one row is held at a time.
//!
//! # Example
//!
//! ```rust,ignore
//! use bitvavo_parqet::{convert_files, ConvertOptions};
//!
//! let report = convert_files(&ConvertOptions::new("bitvavo.csv", "parqet_import.csv"))?;
//! println!("Converted {} buys", report.rows_converted);
//! ```

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::transform_row;
use crate::config::{ConvertOptions, FailureMode};
use crate::error::{ConvertError, ConvertResult, ReadResult};
use crate::logs::{log_info, log_info_indent, log_success, log_warning};
use crate::models::InputRow;
use crate::parser::{decode_input, open_input, RowReader};
use crate::writer::{create_output, ParqetWriter};

/// A buy row left out of the output.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedRow {
    pub line: u64,
    pub reason: String,
}

/// Summary of a conversion run
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConversionReport {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub encoding: String,
    /// Data rows read, header excluded
    pub rows_read: usize,
    /// Buy rows written to the output
    pub rows_converted: usize,
    /// Non-buy rows ignored
    pub rows_filtered: usize,
    /// Buy rows dropped in [`FailureMode::SkipInvalid`]
    pub skipped: Vec<SkippedRow>,
}

impl ConversionReport {
    /// Get summary statistics
    pub fn summary(&self) -> String {
        format!(
            "Read {} rows: {} converted, {} filtered, {} skipped",
            self.rows_read,
            self.rows_converted,
            self.rows_filtered,
            self.skipped.len()
        )
    }
}

/// Stream rows into a writer.
///
/// Read errors are always fatal. Transform errors are fatal in
/// [`FailureMode::Strict`] and recorded in [`FailureMode::SkipInvalid`].
pub fn convert<I, W>(
    rows: I,
    writer: &mut ParqetWriter<W>,
    mode: FailureMode,
) -> ConvertResult<ConversionReport>
where
    I: IntoIterator<Item = ReadResult<InputRow>>,
    W: Write,
{
    let mut report = ConversionReport::default();

    for row in rows {
        let row = row?;
        report.rows_read += 1;

        match transform_row(&row) {
            Ok(Some(out)) => {
                writer.write_row(&out)?;
                report.rows_converted += 1;
            }
            Ok(None) => report.rows_filtered += 1,
            Err(e) if mode == FailureMode::SkipInvalid => {
                log_warning(format!("Skipping line {}: {}", e.line(), e));
                report.skipped.push(SkippedRow {
                    line: e.line(),
                    reason: e.to_string(),
                });
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(report)
}

/// Convert in-memory Bitvavo CSV text to Parqet CSV text.
pub fn convert_str(content: &str, mode: FailureMode) -> ConvertResult<(String, ConversionReport)> {
    let decoded = decode_input(content.as_bytes());
    let rows = RowReader::new(decoded.text.as_bytes())?;
    let mut writer = ParqetWriter::new(Vec::new())?;

    let mut report = convert(rows, &mut writer, mode)?;
    report.encoding = decoded.encoding;

    let bytes = writer.finish()?;
    Ok((String::from_utf8_lossy(&bytes).into_owned(), report))
}

/// Convert a Bitvavo export file into a Parqet import file.
///
/// This is the main entry point. It:
/// 1. Decodes the input and checks its header
/// 2. Streams buy rows through the transformer into the output
/// 3. Optionally saves a JSON report
pub fn convert_files(options: &ConvertOptions) -> ConvertResult<ConversionReport> {
    log_info(format!("Reading {}", options.input.display()));
    let input = open_input(&options.input)?;
    log_success(format!("Detected encoding: {}", input.encoding));

    log_info(format!("CSV has {} columns:", input.rows.headers().len()));
    for (i, col) in input.rows.headers().iter().enumerate() {
        log_info_indent(format!("[{:2}] {}", i + 1, col), 1);
    }

    let mut writer = create_output(&options.output)?;
    let mut report = convert(input.rows, &mut writer, options.failure_mode)?;
    writer.finish()?;

    report.input = Some(options.input.clone());
    report.output = Some(options.output.clone());
    report.encoding = input.encoding;

    log_success(report.summary());
    if !report.skipped.is_empty() {
        log_warning(format!("{} buy rows could not be converted", report.skipped.len()));
    }

    if let Some(ref path) = options.report {
        save_report(&report, path)?;
        log_success(format!("Report saved to {}", path.display()));
    }

    Ok(report)
}

/// Write a report as pretty JSON.
pub fn save_report(report: &ConversionReport, path: &Path) -> ConvertResult<()> {
    let json = serde_json::to_string_pretty(report)
        .map_err(|e| ConvertError::Report(e.to_string()))?;
    std::fs::write(path, json)
        .map_err(|e| ConvertError::Report(format!("{}: {}", path.display(), e)))
}
