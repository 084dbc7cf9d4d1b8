use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::model::{Header, HeaderError, Record, Table, Value};

// ---------------------------------------------------------------------------
// Errors and options
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot open '{}'", .path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Field count disagrees with the header, bad UTF-8, or an I/O error
    /// mid-read.
    #[error("malformed CSV{}", line_suffix(.line))]
    Malformed {
        line: Option<u64>,
        #[source]
        source: csv::Error,
    },

    #[error("invalid CSV header: {0}")]
    Header(#[from] HeaderError),
}

fn line_suffix(line: &Option<u64>) -> String {
    line.map(|l| format!(" at line {l}")).unwrap_or_default()
}

impl LoadError {
    fn malformed(source: csv::Error) -> Self {
        let line = source.position().map(|p| p.line());
        LoadError::Malformed { line, source }
    }
}

/// Reader settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    pub delimiter: u8,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a CSV file whose first row names the columns.
///
/// Every data row must have exactly as many fields as the header; a short or
/// long row fails the whole load. Values are kept as verbatim text.
pub fn load_csv(path: &Path, options: &LoadOptions) -> Result<Table, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::FileAccess {
        path: path.to_path_buf(),
        source,
    })?;
    let table = read_csv(file, options)?;
    log::info!(
        "Loaded {} rows with columns {:?} from {}",
        table.len(),
        table.header.iter().collect::<Vec<_>>(),
        path.display()
    );
    Ok(table)
}

/// Same as [`load_csv`] over any reader.
pub fn read_csv<R: Read>(input: R, options: &LoadOptions) -> Result<Table, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(true)
        .flexible(false)
        .from_reader(input);

    let names: Vec<String> = reader
        .headers()
        .map_err(LoadError::malformed)?
        .iter()
        .map(|h| h.to_string())
        .collect();
    let header = Header::new(names)?;

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result.map_err(LoadError::malformed)?;
        let record = header
            .iter()
            .zip(row.iter())
            .fold(Record::new(), |rec, (col, val)| {
                rec.with(col, Value::from(val))
            });
        records.push(record);
    }

    log::debug!("Parsed {} data rows", records.len());
    Ok(Table::new(header, records))
}
