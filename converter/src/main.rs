//! bitvavo2parqet CLI - Convert a Bitvavo export into a Parqet import
//!
//! ```bash
//! bitvavo2parqet                                  # bitvavo.csv -> parqet_import.csv
//! bitvavo2parqet export.csv import.csv            # explicit paths
//! bitvavo2parqet export.csv --skip-invalid --report report.json
//! ```

use bitvavo_parqet::config::{INPUT_ENV, OUTPUT_ENV};
use bitvavo_parqet::logs::{log_error, LOGGER};
use bitvavo_parqet::{
    convert_files, ConvertOptions, FailureMode, DEFAULT_INPUT, DEFAULT_OUTPUT,
};
use clap::Parser;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "bitvavo2parqet")]
#[command(about = "Convert Bitvavo buy transactions to a Parqet CSV import", long_about = None)]
struct Cli {
    /// Bitvavo CSV export
    #[arg(env = INPUT_ENV, default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Parqet CSV file to write
    #[arg(env = OUTPUT_ENV, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Skip buy rows that cannot be converted instead of aborting
    #[arg(long)]
    skip_invalid: bool,

    /// Save a JSON conversion report
    #[arg(long)]
    report: Option<PathBuf>,

    /// Only print warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn into_options(self) -> ConvertOptions {
        let mut options = ConvertOptions::new(self.input, self.output);
        if self.skip_invalid {
            options = options.with_failure_mode(FailureMode::SkipInvalid);
        }
        if let Some(report) = self.report {
            options = options.with_report(report);
        }
        options
    }
}

fn confirmation(output: &Path) -> String {
    format!(
        "Conversion complete. Parqet-compatible CSV saved to {}",
        output.display()
    )
}

fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    LOGGER.set_quiet(cli.quiet);

    let options = cli.into_options();

    if let Err(e) = convert_files(&options) {
        log_error(format!("Error: {}", e));
        std::process::exit(1);
    }

    println!("{}", confirmation(&options.output));
}
