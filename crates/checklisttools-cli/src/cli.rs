//! CLI argument definitions using clap.

use clap::Parser;
use std::path::PathBuf;

/// Validate sample metadata before submitting them to ENA
#[derive(Parser)]
#[command(name = "validate-samples")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Checklist XML file
    #[arg(value_name = "CHECKLIST_FILE", value_parser = existing_file)]
    pub checklist_file: PathBuf,

    /// TSV file with sample metadata
    #[arg(value_name = "SAMPLES_FILE", value_parser = existing_file)]
    pub samples_file: PathBuf,

    /// Output file for storing failure cases (in TSV format)
    #[arg(short, long, value_name = "FILE")]
    pub output_file: Option<PathBuf>,

    /// Print the validation outcome as JSON
    #[arg(long)]
    pub json: bool,

    /// Marker at the start of the units line
    #[arg(long, default_value = checklisttools::input::DEFAULT_UNITS_MARKER)]
    pub units_marker: String,

    /// Cell value to treat as missing (repeatable)
    #[arg(long = "na-value", value_name = "TOKEN")]
    pub na_values: Vec<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// Expand `~` and make the path absolute, rejecting anything that is not a file.
fn existing_file(value: &str) -> Result<PathBuf, String> {
    let expanded = match value.strip_prefix("~/") {
        Some(rest) => match std::env::var_os("HOME") {
            Some(home) => PathBuf::from(home).join(rest),
            None => PathBuf::from(value),
        },
        None => PathBuf::from(value),
    };
    let path = std::path::absolute(&expanded).unwrap_or(expanded);

    if path.is_file() {
        Ok(path)
    } else {
        Err(format!("{} is not a file", value))
    }
}
