use std::fmt;
use std::num::ParseFloatError;
use std::str::FromStr;

use thiserror::Error;

use crate::data::model::{Header, Record, Table, Value};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AggregateError {
    #[error("malformed aggregate '{0}' (expected column=function)")]
    Malformed(String),

    #[error("function '{0}' does not exist (expected min, max or avg)")]
    UnknownFunction(String),

    #[error("unknown column '{0}'")]
    MissingColumn(String),

    #[error("row {row}: value '{value}' in column '{column}' is not a number")]
    NumericParse {
        row: usize,
        column: String,
        value: String,
        #[source]
        source: ParseFloatError,
    },

    #[error("cannot compute {0} over zero rows")]
    EmptyInput(AggregateFunction),
}

/// Aggregate operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateFunction {
    /// Minimum value
    Min,
    /// Maximum value
    Max,
    /// Arithmetic mean
    Avg,
}

impl AggregateFunction {
    pub fn name(self) -> &'static str {
        match self {
            AggregateFunction::Min => "min",
            AggregateFunction::Max => "max",
            AggregateFunction::Avg => "avg",
        }
    }

    /// Reduce a non-empty slice. A NaN anywhere makes the result NaN.
    fn compute(self, values: &[f64]) -> Option<f64> {
        let (first, rest) = values.split_first()?;
        Some(match self {
            AggregateFunction::Min => rest.iter().copied().fold(*first, nan_or(f64::min)),
            AggregateFunction::Max => rest.iter().copied().fold(*first, nan_or(f64::max)),
            AggregateFunction::Avg => values.iter().sum::<f64>() / values.len() as f64,
        })
    }
}

/// `f64::min`/`f64::max` ignore NaN; keep it instead.
fn nan_or(pick: fn(f64, f64) -> f64) -> impl Fn(f64, f64) -> f64 {
    move |acc, v| {
        if acc.is_nan() || v.is_nan() {
            f64::NAN
        } else {
            pick(acc, v)
        }
    }
}

impl FromStr for AggregateFunction {
    type Err = AggregateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "min" => Ok(AggregateFunction::Min),
            "max" => Ok(AggregateFunction::Max),
            "avg" => Ok(AggregateFunction::Avg),
            other => Err(AggregateError::UnknownFunction(other.to_string())),
        }
    }
}

impl fmt::Display for AggregateFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A parsed `--aggregate` expression: `column=function`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateSpec {
    pub column: String,
    pub function: AggregateFunction,
}

impl AggregateSpec {
    pub fn parse(expr: &str) -> Result<Self, AggregateError> {
        let parts: Vec<&str> = expr.split('=').collect();
        let [column, function] = parts.as_slice() else {
            return Err(AggregateError::Malformed(expr.to_string()));
        };
        if column.is_empty() {
            return Err(AggregateError::Malformed(expr.to_string()));
        }
        Ok(AggregateSpec {
            column: column.to_string(),
            function: function.parse()?,
        })
    }
}

/// Reduce `spec.column` to a single value.
///
/// The result holds one record `{column: value}` under the header
/// `[function]`: the key keeps the source column, the label is the function.
pub fn aggregate(table: &Table, spec: &AggregateSpec) -> Result<Table, AggregateError> {
    if !table.header.contains(&spec.column) {
        return Err(AggregateError::MissingColumn(spec.column.clone()));
    }

    let values = numeric_column(table, &spec.column)?;
    let result = spec
        .function
        .compute(&values)
        .ok_or(AggregateError::EmptyInput(spec.function))?;

    log::debug!(
        "{}({}) over {} rows = {result:?}",
        spec.function,
        spec.column,
        values.len()
    );

    let header = Header::single(spec.function.name());
    let record = Record::new().with(spec.column.as_str(), Value::Number(result));
    Ok(Table::new(header, vec![record]))
}

/// Parse every value of `column` as `f64`, ignoring surrounding whitespace.
fn numeric_column(table: &Table, column: &str) -> Result<Vec<f64>, AggregateError> {
    table
        .records
        .iter()
        .enumerate()
        .map(|(row, record)| {
            let value = record
                .get(column)
                .ok_or_else(|| AggregateError::MissingColumn(column.to_string()))?;
            if let Some(v) = value.as_number() {
                return Ok(v);
            }
            let text = value.as_text();
            text.trim()
                .parse::<f64>()
                .map_err(|source| AggregateError::NumericParse {
                    row: row + 1,
                    column: column.to_string(),
                    value: text.into_owned(),
                    source,
                })
        })
        .collect()
}
