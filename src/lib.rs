//! # csv-query
//!
//! Reads a CSV file, optionally keeps the rows matching one comparison,
//! optionally reduces a column to a single statistic, and renders the
//! result as a bordered text table.
//!
//! - **Filtering**: `column=value`, `column<value`, `column>value`, compared
//!   as raw strings (so `"9" > "10"`)
//! - **Aggregations**: `column=min`, `column=max`, `column=avg` over values
//!   parsed as `f64`
//!
//! # Example
//!
//! ```no_run
//! use csv_query::data::loader::{load_csv, LoadOptions};
//! use csv_query::query::Query;
//! use csv_query::render::render_table;
//! use std::path::Path;
//!
//! fn main() -> anyhow::Result<()> {
//!     let table = load_csv(Path::new("data.csv"), &LoadOptions::default())?;
//!     let query = Query::parse(Some("age>18"), Some("age=min"))?;
//!     println!("{}", render_table(&query.execute(table)?)?);
//!     Ok(())
//! }
//! ```

pub mod app;
pub mod cli;
pub mod data;
pub mod query;
pub mod render;
