use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

use csv_query::data::loader::{load_csv, LoadError, LoadOptions};
use csv_query::data::model::{Record, Table, Value};
use csv_query::query::aggregate::AggregateError;
use csv_query::query::filter::FilterError;
use csv_query::query::{Query, QueryError};
use tempfile::NamedTempFile;

fn roster_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/roster.csv")
}

fn roster() -> Table {
    load_csv(&roster_path(), &LoadOptions::default()).unwrap()
}

fn run_query(where_expr: Option<&str>, aggregate_expr: Option<&str>) -> Result<Table, QueryError> {
    Query::parse(where_expr, aggregate_expr)?.execute(roster())
}

fn person(name: &str, age: &str, command: &str) -> Record {
    Record::new()
        .with("name", name)
        .with("age", age)
        .with("command", command)
}

#[test]
fn loads_roster_fixture() {
    let table = roster();
    assert_eq!(
        table.header.iter().collect::<Vec<_>>(),
        vec!["name", "age", "command"]
    );
    assert_eq!(table.len(), 9);
    assert_eq!(table.records[0], person("Oleg", "20", "1"));
    assert_eq!(table.records[8], person("Artem", "17", "3"));
    for rec in &table.records {
        assert_eq!(rec.columns().collect::<Vec<_>>(), vec!["name", "age", "command"]);
    }
}

#[test]
fn where_then_min() {
    let out = run_query(Some("age>18"), Some("age=min")).unwrap();
    assert_eq!(out.header.iter().collect::<Vec<_>>(), vec!["min"]);
    assert_eq!(out.records, vec![Record::new().with("age", Value::Number(19.0))]);
}

#[test]
fn aggregates_full_roster() {
    for (expr, label, expected) in [
        ("age=min", "min", 17.0),
        ("age=max", "max", 22.0),
        ("age=avg", "avg", 19.11111111111111),
    ] {
        let out = run_query(None, Some(expr)).unwrap();
        assert_eq!(out.header.iter().collect::<Vec<_>>(), vec![label]);
        assert_eq!(out.records, vec![Record::new().with("age", Value::Number(expected))]);
    }
}

#[test]
fn where_selects_matching_rows() {
    let cases = [
        ("age=20", vec![person("Oleg", "20", "1"), person("Ed", "20", "3")]),
        ("age>20", vec![person("Gleb", "21", "1"), person("Andrey", "22", "3")]),
        ("age<18", vec![person("Ilya", "17", "1"), person("Artem", "17", "3")]),
    ];
    for (expr, expected) in cases {
        let out = run_query(Some(expr), None).unwrap();
        assert_eq!(out.header, roster().header);
        assert_eq!(out.records, expected, "filter {expr}");
    }
}

#[test]
fn where_without_operator_is_filter_error() {
    assert!(matches!(
        run_query(Some("age+10"), None),
        Err(QueryError::Filter(FilterError::NoOperator(_)))
    ));
}

#[test]
fn unknown_aggregate_names_the_function() {
    match run_query(None, Some("age=sum")) {
        Err(QueryError::Aggregate(AggregateError::UnknownFunction(name))) => {
            assert_eq!(name, "sum")
        }
        other => panic!("expected unknown function error, got {other:?}"),
    }
}

#[test]
fn aggregating_text_column_is_numeric_error() {
    assert!(matches!(
        run_query(None, Some("name=max")),
        Err(QueryError::Aggregate(AggregateError::NumericParse { row: 1, .. }))
    ));
}

#[test]
fn ragged_file_is_rejected() {
    let mut tmp = NamedTempFile::new().unwrap();
    write!(tmp, "name,age\nOleg,20\nGleb\n").unwrap();
    assert!(matches!(
        load_csv(tmp.path(), &LoadOptions::default()),
        Err(LoadError::Malformed { line: Some(3), .. })
    ));
}

// ---------------------------------------------------------------------------
// Binary
// ---------------------------------------------------------------------------

fn csv_query(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_csv-query"))
        .args(args)
        .output()
        .unwrap()
}

#[test]
fn binary_prints_bordered_table() {
    let path = roster_path();
    let out = csv_query(&["--file", path.to_str().unwrap(), "--where", "age=20"]);
    assert!(out.status.success());

    let stdout = String::from_utf8(out.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert!(lines[0].starts_with("+-"));
    assert!(lines[1].contains("name") && lines[1].contains("command"));
    assert!(stdout.contains("Oleg") && stdout.contains("Ed"));
    assert!(!stdout.contains("Gleb"));
}

#[test]
fn binary_prints_aggregate_under_function_label() {
    let path = roster_path();
    let out = csv_query(&[
        "--file",
        path.to_str().unwrap(),
        "--where",
        "age>18",
        "--aggregate",
        "age=min",
    ]);
    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(stdout.contains("min"));
    assert!(stdout.contains("19.0"));
}

#[test]
fn binary_exit_codes() {
    let path = roster_path();
    let path = path.to_str().unwrap();

    let out = csv_query(&["--file", path, "--aggregate", "age=sum"]);
    assert_eq!(out.status.code(), Some(65));
    assert!(String::from_utf8_lossy(&out.stderr).contains("sum"));

    let out = csv_query(&["--file", "/no/such/roster.csv"]);
    assert_eq!(out.status.code(), Some(66));

    let out = csv_query(&["--where", "age=20"]);
    assert_eq!(out.status.code(), Some(2));

    let mut ragged = NamedTempFile::new().unwrap();
    write!(ragged, "a,b\n1\n").unwrap();
    let out = csv_query(&["--file", ragged.path().to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(65));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("malformed CSV at line 2"));
    assert_eq!(stderr.matches("found record with 1 fields").count(), 1);
}
