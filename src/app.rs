use anyhow::{Context, Result};

use crate::cli::Cli;
use crate::data::loader::{load_csv, LoadError};
use crate::query::{Query, QueryError};
use crate::render::render_table;

// ---------------------------------------------------------------------------
// Exit codes (sysexits.h)
// ---------------------------------------------------------------------------

/// Input data or query expression is invalid.
pub const EXIT_DATA_ERROR: u8 = 65;
/// Input file cannot be opened.
pub const EXIT_NO_INPUT: u8 = 66;
/// Anything else, e.g. the table could not be rendered.
pub const EXIT_SOFTWARE: u8 = 70;

// ---------------------------------------------------------------------------
// One-shot pipeline: load → filter → aggregate → render
// ---------------------------------------------------------------------------

pub struct CsvQueryApp {
    pub cli: Cli,
}

impl CsvQueryApp {
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the whole pipeline and return the rendered table.
    ///
    /// Query expressions are parsed before the file is touched.
    pub fn run(&self) -> Result<String> {
        let query = Query::parse(
            self.cli.where_expr.as_deref(),
            self.cli.aggregate_expr.as_deref(),
        )
        .context("invalid query")?;

        let table = load_csv(&self.cli.file, &self.cli.load_options())
            .context("loading CSV")?;

        let result = query.execute(table).context("running query")?;
        log::info!(
            "Query produced {} rows under columns {:?}",
            result.len(),
            result.header.iter().collect::<Vec<_>>()
        );

        render_table(&result).context("rendering table")
    }
}

/// Map a pipeline failure to a process exit code.
pub fn exit_code(err: &anyhow::Error) -> u8 {
    if let Some(load) = err.downcast_ref::<LoadError>() {
        return match load {
            LoadError::FileAccess { .. } => EXIT_NO_INPUT,
            LoadError::Malformed { .. } | LoadError::Header(_) => EXIT_DATA_ERROR,
        };
    }
    if err.downcast_ref::<QueryError>().is_some() {
        return EXIT_DATA_ERROR;
    }
    EXIT_SOFTWARE
}
