use std::process::ExitCode;

use csv_query::app::{exit_code, CsvQueryApp};
use csv_query::cli::Cli;

fn main() -> ExitCode {
    env_logger::init();

    let app = CsvQueryApp::new(Cli::parse_args());
    match app.run() {
        Ok(table) => {
            println!("{table}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::debug!("Query failed: {e:?}");
            eprintln!("Error: {e:#}");
            ExitCode::from(exit_code(&e))
        }
    }
}
