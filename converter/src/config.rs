//! Conversion options.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default Bitvavo export path.
pub const DEFAULT_INPUT: &str = "bitvavo.csv";

/// Default Parqet import path.
pub const DEFAULT_OUTPUT: &str = "parqet_import.csv";

/// Environment variable overriding the input path.
pub const INPUT_ENV: &str = "BITVAVO_INPUT";

/// Environment variable overriding the output path.
pub const OUTPUT_ENV: &str = "PARQET_OUTPUT";

/// What to do when a buy row cannot be converted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureMode {
    /// Abort on the first bad row.
    #[default]
    Strict,
    /// Record the row in the report and keep going.
    SkipInvalid,
}

/// Options for a conversion run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertOptions {
    /// Bitvavo export to read
    pub input: PathBuf,

    /// Parqet import file to write
    pub output: PathBuf,

    #[serde(default)]
    pub failure_mode: FailureMode,

    /// Where to save a JSON conversion report
    #[serde(default)]
    pub report: Option<PathBuf>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            failure_mode: FailureMode::Strict,
            report: None,
        }
    }
}

impl ConvertOptions {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            ..Self::default()
        }
    }

    pub fn with_failure_mode(mut self, mode: FailureMode) -> Self {
        self.failure_mode = mode;
        self
    }

    pub fn with_report(mut self, path: impl Into<PathBuf>) -> Self {
        self.report = Some(path.into());
        self
    }
}
