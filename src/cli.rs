//! CLI argument definitions using clap
//!
//! ```text
//! csv-query --file data.csv [--where age>18] [--aggregate age=min] [--delimiter ';']
//! ```

use clap::Parser;
use std::path::PathBuf;

use crate::data::loader::LoadOptions;

/// Filter and aggregate a CSV file, printing the result as a table
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "csv-query")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to the CSV file (first row is the header)
    #[arg(long)]
    pub file: PathBuf,

    /// Keep rows matching `column<op>value`, op is one of = < > (string comparison)
    #[arg(long = "where", value_name = "EXPR")]
    pub where_expr: Option<String>,

    /// Reduce a column with `column=function`, function is one of min, max, avg
    #[arg(long = "aggregate", value_name = "EXPR")]
    pub aggregate_expr: Option<String>,

    /// Field delimiter (single ASCII character)
    #[arg(long, default_value = ",", value_parser = parse_delimiter)]
    pub delimiter: u8,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            delimiter: self.delimiter,
        }
    }
}

fn parse_delimiter(s: &str) -> Result<u8, String> {
    match s.as_bytes() {
        [b] if b.is_ascii() => Ok(*b),
        _ => Err(format!("delimiter must be a single ASCII character, got '{s}'")),
    }
}
